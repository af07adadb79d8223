//! midikeys-mapper library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does midikeys do? (for beginners)
//!
//! midikeys turns a MIDI keyboard into a computer keyboard, aimed at
//! playing games and controlling software with a piano.  The mapper:
//!
//! 1. Opens a MIDI input port and receives note-on/note-off events.
//! 2. Looks the note up in the active *profile* (note → key-spec map,
//!    e.g. `60 → "ctrl+shift+a"`), applying a velocity filter.
//! 3. Injects the mapped keystroke through a platform backend
//!    (`SendInput` on Windows, `xdotool`/XTest on Linux, Core Graphics
//!    on macOS), holding it for as long as the note is held.
//!
//! Profiles are edited through the async command surface in
//! `infrastructure::control` and persisted as TOML.

/// Application layer: the mapping engine and profile management.
pub mod application;

/// Command-line argument parsing.
pub mod cli;

/// Infrastructure layer: OS adapters, storage, and the command surface.
pub mod infrastructure;
