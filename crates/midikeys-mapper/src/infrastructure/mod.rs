//! Infrastructure layer for the mapper application.
//!
//! Contains OS-facing adapters: keyboard injection APIs, MIDI port I/O,
//! file-system storage, and the command surface consumed by front ends.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `midikeys_core`, but MUST NOT be imported by the `application` or
//! domain layers.
//!
//! # Sub-modules
//!
//! - **`keyboard`** – platform implementations of `KeyboardBackend`
//!   (SendInput, xdotool, XTest, Core Graphics) plus the startup probe and
//!   a recording mock for tests.
//!
//! - **`midi_input`** – the `MidiSource` trait, the `midir` hardware
//!   adapter that bridges the driver callback thread into a tokio channel,
//!   and a scriptable mock.
//!
//! - **`storage`** – TOML config persistence in the platform config
//!   directory, plus the one-shot legacy JSON import.
//!
//! - **`control`** – the async command surface (`AppState`,
//!   `CommandResult`) through which the CLI and future UIs drive the
//!   engine and edit profiles.

pub mod control;
pub mod keyboard;
pub mod midi_input;
pub mod storage;
