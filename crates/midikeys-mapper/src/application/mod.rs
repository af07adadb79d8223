//! Application layer use cases for the mapper.
//!
//! # What use cases does the mapper have?
//!
//! - **`map_events`** – The mapping engine. Consumes `MidiEvent`s, resolves
//!   the active profile, and drives a `KeyboardBackend` implementation that
//!   is injected at construction time. Owns the enabled flag and the
//!   held-key table.
//!
//! - **`manage_profiles`** – The profile registry: create/rename/delete
//!   profiles, note→action assignment, velocity thresholds, and the
//!   active-profile pointer, plus conversion to and from the persisted
//!   configuration schema.

pub mod manage_profiles;
pub mod map_events;
