//! Domain entities for the MIDI mapper.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: the typed MIDI event, the mapping profile, and the
//! persisted profile schema.  It compiles and tests on any platform
//! without a MIDI port, an X server, or a config file present.

pub mod midi;
pub mod profile;
