//! Typed MIDI input events.
//!
//! Raw MIDI messages arrive as 1-3 byte packets from the port driver.  The
//! mapper only cares about note events on any channel; everything else is
//! classified as [`MidiEventKind::Other`] so the engine can ignore it without
//! losing visibility in trace logs.
//!
//! # Note-off by convention
//!
//! Many keyboards never send a real Note Off (status `0x8n`).  Instead they
//! send Note On (status `0x9n`) with velocity 0, a convention old enough to
//! be part of the MIDI 1.0 spec.  [`MidiEvent::from_raw`] normalizes that
//! form to [`MidiEventKind::NoteOff`] so downstream code only ever deals
//! with one representation.

use std::time::Instant;

/// Classification of an incoming MIDI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEventKind {
    NoteOn,
    NoteOff,
    /// Any non-note message (control change, pitch bend, clock, …).
    Other,
}

/// A single MIDI input event, immutable once produced.
#[derive(Debug, Clone, Copy)]
pub struct MidiEvent {
    pub kind: MidiEventKind,
    /// Note number 0-127 (0 for non-note messages without data bytes).
    pub note: u8,
    /// Velocity 0-127 (release velocity for note-off; 0 when absent).
    pub velocity: u8,
    /// Monotonic arrival time, taken when the raw bytes were decoded.
    pub timestamp: Instant,
}

impl MidiEvent {
    /// Decodes a raw MIDI packet.
    ///
    /// Returns `None` for empty packets.  Note On with velocity 0 becomes
    /// [`MidiEventKind::NoteOff`].  The channel nibble is ignored: the
    /// mapper listens to all channels, as the original hardware setups it
    /// targets rarely agree on one.
    pub fn from_raw(bytes: &[u8]) -> Option<MidiEvent> {
        let status = *bytes.first()?;
        let note = bytes.get(1).copied().unwrap_or(0) & 0x7F;
        let velocity = bytes.get(2).copied().unwrap_or(0) & 0x7F;

        let kind = match status & 0xF0 {
            0x90 if velocity > 0 => MidiEventKind::NoteOn,
            0x90 => MidiEventKind::NoteOff,
            0x80 => MidiEventKind::NoteOff,
            _ => MidiEventKind::Other,
        };

        Some(MidiEvent {
            kind,
            note,
            velocity,
            timestamp: Instant::now(),
        })
    }

    /// Constructs a note-on event directly.
    pub fn note_on(note: u8, velocity: u8) -> MidiEvent {
        MidiEvent {
            kind: MidiEventKind::NoteOn,
            note,
            velocity,
            timestamp: Instant::now(),
        }
    }

    /// Constructs a note-off event directly.
    pub fn note_off(note: u8) -> MidiEvent {
        MidiEvent {
            kind: MidiEventKind::NoteOff,
            note,
            velocity: 0,
            timestamp: Instant::now(),
        }
    }
}

/// Scientific pitch name for a MIDI note number, e.g. `60` → `"C4"`.
///
/// Used in logs and status output so users can recognize notes without
/// counting semitones.
pub fn note_name(note: u8) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = (i32::from(note) / 12) - 1;
    format!("{}{}", NAMES[usize::from(note) % 12], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_decodes_note_on() {
        // Act
        let event = MidiEvent::from_raw(&[0x90, 60, 100]).unwrap();

        // Assert
        assert_eq!(event.kind, MidiEventKind::NoteOn);
        assert_eq!(event.note, 60);
        assert_eq!(event.velocity, 100);
    }

    #[test]
    fn test_from_raw_decodes_note_off() {
        let event = MidiEvent::from_raw(&[0x80, 60, 0]).unwrap();
        assert_eq!(event.kind, MidiEventKind::NoteOff);
        assert_eq!(event.note, 60);
    }

    #[test]
    fn test_from_raw_treats_zero_velocity_note_on_as_note_off() {
        // Running-status keyboards send 0x90 with velocity 0 instead of 0x80.
        let event = MidiEvent::from_raw(&[0x90, 64, 0]).unwrap();
        assert_eq!(event.kind, MidiEventKind::NoteOff);
        assert_eq!(event.note, 64);
    }

    #[test]
    fn test_from_raw_ignores_channel_nibble() {
        let ch0 = MidiEvent::from_raw(&[0x90, 60, 80]).unwrap();
        let ch9 = MidiEvent::from_raw(&[0x99, 60, 80]).unwrap();
        assert_eq!(ch0.kind, MidiEventKind::NoteOn);
        assert_eq!(ch9.kind, MidiEventKind::NoteOn);
    }

    #[test]
    fn test_from_raw_classifies_non_note_messages_as_other() {
        // Control change, pitch bend, and a bare clock byte.
        for raw in [&[0xB0, 64, 127][..], &[0xE0, 0, 64], &[0xF8]] {
            let event = MidiEvent::from_raw(raw).unwrap();
            assert_eq!(event.kind, MidiEventKind::Other, "bytes {raw:02X?}");
        }
    }

    #[test]
    fn test_from_raw_rejects_empty_packet() {
        assert!(MidiEvent::from_raw(&[]).is_none());
    }

    #[test]
    fn test_note_names_follow_scientific_pitch() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(127), "G9");
        assert_eq!(note_name(61), "C#4");
    }
}
