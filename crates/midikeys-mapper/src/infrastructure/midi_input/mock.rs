//! Mock MIDI source for unit testing.
//!
//! Lets tests script a stream of [`MidiEvent`]s without MIDI hardware,
//! virtual ports, or an OS driver thread.

use std::sync::{Arc, Mutex};

use midikeys_core::MidiEvent;
use tokio::sync::mpsc;

use super::{MidiSource, SourceError, EVENT_CHANNEL_CAPACITY};

/// A mock implementation of [`MidiSource`] that allows tests to inject
/// events and to simulate the port disappearing.
pub struct MockMidiSource {
    ports: Vec<String>,
    sender: Arc<Mutex<Option<mpsc::Sender<MidiEvent>>>>,
}

impl MockMidiSource {
    /// Creates a mock exposing a single port named `"mock port"`.
    pub fn new() -> Self {
        Self::with_ports(vec!["mock port".to_string()])
    }

    /// Creates a mock exposing the given port names.
    pub fn with_ports(ports: Vec<String>) -> Self {
        Self {
            ports,
            sender: Arc::new(Mutex::new(None)),
        }
    }

    /// Injects a synthetic event, as if received from hardware.
    ///
    /// Panics if `open()` has not been called or the source was closed.
    pub fn inject(&self, event: MidiEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        if let Some(ref sender) = *guard {
            sender
                .try_send(event)
                .expect("event channel full or receiver dropped");
        } else {
            panic!("MockMidiSource::inject called before open()");
        }
    }

    /// Simulates the port disappearing mid-session: the event channel
    /// closes and the engine sees end-of-stream.
    pub fn disconnect(&self) {
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

impl Default for MockMidiSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiSource for MockMidiSource {
    fn list_ports(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.ports.clone())
    }

    fn open(&mut self, port_name: &str) -> Result<mpsc::Receiver<MidiEvent>, SourceError> {
        if !self.ports.iter().any(|p| p == port_name) {
            return Err(SourceError::PortNotFound {
                name: port_name.to_string(),
                available: self.ports.clone(),
            });
        }
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn close(&mut self) {
        self.disconnect();
    }
}
