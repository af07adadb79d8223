//! MIDI input infrastructure.
//!
//! The production adapter wraps the `midir` crate, which delivers raw MIDI
//! bytes on an OS callback thread.  The adapter parses them into
//! [`MidiEvent`]s and forwards through a bounded tokio channel that the
//! engine task consumes; a full channel applies backpressure to the
//! callback rather than reordering or dropping events.
//!
//! # Testability
//!
//! The [`MidiSource`] trait lets tests script event streams through
//! `mock::MockMidiSource` without MIDI hardware or virtual ports.

pub mod midir;
pub mod mock;

use midikeys_core::MidiEvent;
use tokio::sync::mpsc;

/// Capacity of the event channel between the MIDI callback thread and the
/// engine task.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Error type for MIDI source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to initialize MIDI input: {0}")]
    Init(String),
    #[error("MIDI port {name:?} not found (available: {})", available.join(", "))]
    PortNotFound { name: String, available: Vec<String> },
    #[error("failed to connect to MIDI port: {0}")]
    Connect(String),
}

/// Trait abstracting MIDI event production.
///
/// The production implementation is `midir::MidirSource`; tests use
/// `mock::MockMidiSource`.
pub trait MidiSource: Send {
    /// Lists the names of the currently visible input ports.
    fn list_ports(&self) -> Result<Vec<String>, SourceError>;

    /// Opens the named port and returns the receiving end of the event
    /// stream.  Closure of the channel signals that the source is gone.
    fn open(&mut self, port_name: &str) -> Result<mpsc::Receiver<MidiEvent>, SourceError>;

    /// Closes the active connection, if any.  Idempotent.
    fn close(&mut self);
}
