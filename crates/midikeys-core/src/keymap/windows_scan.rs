//! Symbolic key to Windows keyboard scan code translation (scan code set 1).
//!
//! Reference: IBM PC/AT scan code set 1, as consumed by `SendInput` with
//! `KEYEVENTF_SCANCODE`.
//!
//! # Why scan codes instead of Virtual Key codes? (for beginners)
//!
//! Windows offers two ways to describe a key in a synthesized event:
//!
//! - **Virtual Key (VK) codes** identify *logical* keys (`VK_A`, `VK_RETURN`).
//!   Events synthesized with VK codes travel through the normal message
//!   queue, and DirectInput-based games ignore them entirely.
//! - **Scan codes** identify *physical* key positions as the keyboard
//!   hardware reports them.  Events synthesized with `KEYEVENTF_SCANCODE`
//!   look like hardware input to every consumer, including games that read
//!   input below the message queue.
//!
//! The mapper exists to play games with a MIDI keyboard, so the scan-code
//! path is the one that matters here.
//!
//! # Extended keys
//!
//! The navigation cluster (arrows, Insert/Delete, Home/End, Page Up/Down)
//! shares scan code values with the numeric keypad.  Hardware distinguishes
//! the two by an `0xE0` prefix byte; `SendInput` expresses that prefix as
//! the `KEYEVENTF_EXTENDEDKEY` flag.  [`is_extended`] reports which keys
//! need it.

use super::key::{Key, Modifier};

/// Translates a [`Key`] to its set-1 scan code.
///
/// Returns `None` for characters that have no position on a US-layout
/// keyboard; the Windows backend reports those as unsupported rather than
/// injecting a wrong key.
pub fn key_to_scan_code(key: Key) -> Option<u16> {
    match key {
        Key::Char(c) => char_scan_code(c),

        Key::Escape => Some(0x01),
        Key::Tab => Some(0x0F),
        Key::Enter => Some(0x1C),
        Key::Space => Some(0x39),
        Key::Backspace => Some(0x0E),

        Key::F1 => Some(0x3B),
        Key::F2 => Some(0x3C),
        Key::F3 => Some(0x3D),
        Key::F4 => Some(0x3E),
        Key::F5 => Some(0x3F),
        Key::F6 => Some(0x40),
        Key::F7 => Some(0x41),
        Key::F8 => Some(0x42),
        Key::F9 => Some(0x43),
        Key::F10 => Some(0x44),
        Key::F11 => Some(0x57),
        Key::F12 => Some(0x58),

        // Navigation cluster (extended; values shared with the numpad)
        Key::ArrowUp => Some(0x48),
        Key::ArrowDown => Some(0x50),
        Key::ArrowLeft => Some(0x4B),
        Key::ArrowRight => Some(0x4D),
        Key::Insert => Some(0x52),
        Key::Delete => Some(0x53),
        Key::Home => Some(0x47),
        Key::End => Some(0x4F),
        Key::PageUp => Some(0x49),
        Key::PageDown => Some(0x51),
    }
}

/// Returns `true` when the key needs `KEYEVENTF_EXTENDEDKEY` (the `0xE0`
/// prefix in hardware terms).
pub fn is_extended(key: Key) -> bool {
    matches!(
        key,
        Key::ArrowUp
            | Key::ArrowDown
            | Key::ArrowLeft
            | Key::ArrowRight
            | Key::Insert
            | Key::Delete
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown
    )
}

/// Scan code for a modifier key.  Left-side codes by convention; the mapper
/// never needs the right-side variants.
pub fn modifier_scan_code(modifier: Modifier) -> u16 {
    match modifier {
        Modifier::Ctrl => 0x1D,  // left Ctrl
        Modifier::Alt => 0x38,   // left Alt
        Modifier::Shift => 0x2A, // left Shift
    }
}

fn char_scan_code(c: char) -> Option<u16> {
    let code = match c {
        'a' => 0x1E,
        'b' => 0x30,
        'c' => 0x2E,
        'd' => 0x20,
        'e' => 0x12,
        'f' => 0x21,
        'g' => 0x22,
        'h' => 0x23,
        'i' => 0x17,
        'j' => 0x24,
        'k' => 0x25,
        'l' => 0x26,
        'm' => 0x32,
        'n' => 0x31,
        'o' => 0x18,
        'p' => 0x19,
        'q' => 0x10,
        'r' => 0x13,
        's' => 0x1F,
        't' => 0x14,
        'u' => 0x16,
        'v' => 0x2F,
        'w' => 0x11,
        'x' => 0x2D,
        'y' => 0x15,
        'z' => 0x2C,

        '1' => 0x02,
        '2' => 0x03,
        '3' => 0x04,
        '4' => 0x05,
        '5' => 0x06,
        '6' => 0x07,
        '7' => 0x08,
        '8' => 0x09,
        '9' => 0x0A,
        '0' => 0x0B,

        '-' => 0x0C,
        '=' => 0x0D,
        '[' => 0x1A,
        ']' => 0x1B,
        '\\' => 0x2B,
        ';' => 0x27,
        '\'' => 0x28,
        '`' => 0x29,
        ',' => 0x33,
        '.' => 0x34,
        '/' => 0x35,

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_digit_scan_codes() {
        assert_eq!(key_to_scan_code(Key::Char('a')), Some(0x1E));
        assert_eq!(key_to_scan_code(Key::Char('q')), Some(0x10));
        assert_eq!(key_to_scan_code(Key::Char('z')), Some(0x2C));
        assert_eq!(key_to_scan_code(Key::Char('1')), Some(0x02));
        assert_eq!(key_to_scan_code(Key::Char('0')), Some(0x0B));
    }

    #[test]
    fn test_function_key_scan_codes_span_the_gap_after_f10() {
        // F1-F10 are contiguous; F11/F12 were added later at 0x57/0x58.
        assert_eq!(key_to_scan_code(Key::F1), Some(0x3B));
        assert_eq!(key_to_scan_code(Key::F10), Some(0x44));
        assert_eq!(key_to_scan_code(Key::F11), Some(0x57));
        assert_eq!(key_to_scan_code(Key::F12), Some(0x58));
    }

    #[test]
    fn test_navigation_cluster_is_extended() {
        let navigation = [
            Key::ArrowUp,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowRight,
            Key::Insert,
            Key::Delete,
            Key::Home,
            Key::End,
            Key::PageUp,
            Key::PageDown,
        ];

        for key in navigation {
            assert!(is_extended(key), "{key:?} should be extended");
            assert!(key_to_scan_code(key).is_some(), "{key:?} needs a code");
        }
    }

    #[test]
    fn test_main_block_keys_are_not_extended() {
        for key in [Key::Char('a'), Key::Enter, Key::Space, Key::F5] {
            assert!(!is_extended(key), "{key:?} should not be extended");
        }
    }

    #[test]
    fn test_modifiers_use_left_side_codes() {
        assert_eq!(modifier_scan_code(Modifier::Ctrl), 0x1D);
        assert_eq!(modifier_scan_code(Modifier::Shift), 0x2A);
        assert_eq!(modifier_scan_code(Modifier::Alt), 0x38);
    }

    #[test]
    fn test_unmapped_character_returns_none() {
        assert_eq!(key_to_scan_code(Key::Char('é')), None);
        assert_eq!(key_to_scan_code(Key::Char('£')), None);
    }
}
