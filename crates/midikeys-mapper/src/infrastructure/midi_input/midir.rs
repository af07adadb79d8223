//! Hardware MIDI port adapter backed by the `midir` crate.
//!
//! midir invokes the event callback on a thread owned by the OS MIDI
//! driver (ALSA sequencer thread, CoreMIDI dispatch, WinMM callback).
//! That thread only decodes bytes and hands the event over; everything
//! stateful happens on the engine task.

use midir::{Ignore, MidiInput, MidiInputConnection};
use midikeys_core::MidiEvent;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{MidiSource, SourceError, EVENT_CHANNEL_CAPACITY};

/// MIDI input source connected to a real (or virtual) port.
///
/// Dropping the source closes the midir connection, which releases the
/// port back to the OS.
pub struct MidirSource {
    client_name: String,
    connection: Option<MidiInputConnection<()>>,
}

impl MidirSource {
    /// Creates an unconnected source.  `client_name` is what other MIDI
    /// software sees in its port lists.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            connection: None,
        }
    }

    /// A fresh midir client for enumeration.  midir consumes the client on
    /// connect, so list and open each create their own.
    fn client(&self) -> Result<MidiInput, SourceError> {
        MidiInput::new(&self.client_name).map_err(|e| SourceError::Init(e.to_string()))
    }
}

impl MidiSource for MidirSource {
    fn list_ports(&self) -> Result<Vec<String>, SourceError> {
        let input = self.client()?;
        let mut names = Vec::new();
        for port in input.ports() {
            match input.port_name(&port) {
                Ok(name) => names.push(name),
                Err(e) => warn!("skipping MIDI port with unreadable name: {e}"),
            }
        }
        Ok(names)
    }

    fn open(&mut self, port_name: &str) -> Result<mpsc::Receiver<MidiEvent>, SourceError> {
        self.close();

        let mut input = self.client()?;
        input.ignore(Ignore::None);

        let mut target = None;
        let mut available = Vec::new();
        for port in input.ports() {
            let name = input.port_name(&port).unwrap_or_default();
            if target.is_none() && name == port_name {
                target = Some(port);
            }
            available.push(name);
        }
        let Some(port) = target else {
            return Err(SourceError::PortNotFound {
                name: port_name.to_string(),
                available,
            });
        };

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let connection = input
            .connect(
                &port,
                "midikeys-in",
                move |_timestamp_us, bytes, _data| {
                    if let Some(event) = MidiEvent::from_raw(bytes) {
                        // blocking_send is correct here: this closure runs
                        // on the driver's own thread, never inside the
                        // tokio runtime.  A full channel stalls the driver
                        // until the engine catches up.
                        if tx.blocking_send(event).is_err() {
                            debug!("engine receiver gone; discarding MIDI event");
                        }
                    }
                },
                (),
            )
            .map_err(|e| SourceError::Connect(e.to_string()))?;

        info!("connected to MIDI port {port_name:?}");
        self.connection = Some(connection);
        Ok(rx)
    }

    fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            info!("MIDI connection closed");
        }
    }
}

impl Drop for MidirSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_unknown_port_is_not_found_or_init() {
        // Arrange: a port name no system will have. On hosts without a MIDI
        // subsystem the client itself fails, which is also acceptable.
        let mut source = MidirSource::new("midikeys-test");

        // Act
        let result = source.open("port that cannot exist 8f3a");

        // Assert
        match result {
            Err(SourceError::PortNotFound { name, .. }) => {
                assert_eq!(name, "port that cannot exist 8f3a");
            }
            Err(SourceError::Init(_)) => {}
            Err(SourceError::Connect(e)) => panic!("unexpected connect error: {e}"),
            Ok(_) => panic!("nonexistent port must not open"),
        }
    }

    #[test]
    fn test_close_without_connection_is_a_no_op() {
        let mut source = MidirSource::new("midikeys-test");
        source.close();
        source.close();
    }
}
