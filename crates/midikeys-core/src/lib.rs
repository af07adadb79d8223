//! # midikeys-core
//!
//! Shared library for midikeys containing the key model, key spec parsing,
//! platform key code translation tables, and the mapping profile schema.
//!
//! This crate is consumed by the mapper application.  It has zero
//! dependencies on OS APIs, MIDI drivers, or UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! midikeys turns a MIDI instrument into a computer keyboard: each note you
//! play is translated to a configurable keyboard action ("note 60 presses
//! `a`", "note 36 presses `ctrl+shift+f5`") and injected as real system
//! input, precisely enough that games accept it.
//!
//! This crate (`midikeys-core`) is the shared foundation.  It defines:
//!
//! - **`keymap`** – The symbolic [`Key`]/[`KeyAction`] model, the key-spec
//!   parser, and the translation tables that turn a symbolic key into the
//!   code each platform backend needs (Windows scan codes, X11 KeySyms,
//!   macOS CGKeyCodes).
//!
//! - **`domain`** – Pure business entities: the typed [`MidiEvent`] decoded
//!   from raw port bytes, and the [`Profile`] mapping table together with
//!   its persisted schema form.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `midikeys_core::KeyAction` instead of `midikeys_core::keymap::action::KeyAction`.
pub use domain::midi::{note_name, MidiEvent, MidiEventKind};
pub use domain::profile::{MapperConfig, Profile, ProfileConfig, ProfileSchemaError};
pub use keymap::{Key, KeyAction, KeyMapper, KeySpecError, Modifier, ModifierFlags};
