//! Symbolic key to macOS CGKeyCode translation table.
//!
//! CGKeyCode values are defined in Carbon Events.h (HIToolbox framework) and
//! identify physical key positions on an ANSI layout.
//! Reference: /System/Library/Frameworks/Carbon.framework/Versions/A/Frameworks/HIToolbox.framework/Headers/Events.h

use super::key::{Key, Modifier};

/// Translates a [`Key`] to a macOS `CGKeyCode`.
///
/// Returns `None` for keys with no ANSI position (macOS keyboards have no
/// Insert key, and characters outside the US layout have no fixed code).
pub fn key_to_cgkeycode(key: Key) -> Option<u16> {
    match key {
        Key::Char(c) => char_cgkeycode(c),

        Key::Enter => Some(0x24),     // kVK_Return
        Key::Tab => Some(0x30),       // kVK_Tab
        Key::Space => Some(0x31),     // kVK_Space
        Key::Backspace => Some(0x33), // kVK_Delete (backspace on ANSI)
        Key::Escape => Some(0x35),    // kVK_Escape
        Key::Delete => Some(0x75),    // kVK_ForwardDelete
        Key::Insert => None,          // no ANSI equivalent
        Key::Home => Some(0x73),      // kVK_Home
        Key::End => Some(0x77),       // kVK_End
        Key::PageUp => Some(0x74),    // kVK_PageUp
        Key::PageDown => Some(0x79),  // kVK_PageDown
        Key::ArrowLeft => Some(0x7B), // kVK_LeftArrow
        Key::ArrowRight => Some(0x7C), // kVK_RightArrow
        Key::ArrowDown => Some(0x7D), // kVK_DownArrow
        Key::ArrowUp => Some(0x7E),   // kVK_UpArrow

        Key::F1 => Some(0x7A),
        Key::F2 => Some(0x78),
        Key::F3 => Some(0x63),
        Key::F4 => Some(0x76),
        Key::F5 => Some(0x60),
        Key::F6 => Some(0x61),
        Key::F7 => Some(0x62),
        Key::F8 => Some(0x64),
        Key::F9 => Some(0x65),
        Key::F10 => Some(0x6D),
        Key::F11 => Some(0x67),
        Key::F12 => Some(0x6F),
    }
}

/// `CGKeyCode` for a modifier key, left-side by convention.
pub fn modifier_cgkeycode(modifier: Modifier) -> u16 {
    match modifier {
        Modifier::Ctrl => 0x3B,  // kVK_Control
        Modifier::Alt => 0x3A,   // kVK_Option
        Modifier::Shift => 0x38, // kVK_Shift
    }
}

fn char_cgkeycode(c: char) -> Option<u16> {
    let code = match c {
        'a' => 0x00, // kVK_ANSI_A
        's' => 0x01,
        'd' => 0x02,
        'f' => 0x03,
        'h' => 0x04,
        'g' => 0x05,
        'z' => 0x06,
        'x' => 0x07,
        'c' => 0x08,
        'v' => 0x09,
        'b' => 0x0B,
        'q' => 0x0C,
        'w' => 0x0D,
        'e' => 0x0E,
        'r' => 0x0F,
        'y' => 0x10,
        't' => 0x11,
        'o' => 0x1F,
        'u' => 0x20,
        'i' => 0x22,
        'p' => 0x23,
        'l' => 0x25,
        'j' => 0x26,
        'k' => 0x28,
        'n' => 0x2D,
        'm' => 0x2E,

        '1' => 0x12,
        '2' => 0x13,
        '3' => 0x14,
        '4' => 0x15,
        '5' => 0x17,
        '6' => 0x16,
        '7' => 0x1A,
        '8' => 0x1C,
        '9' => 0x19,
        '0' => 0x1D,

        '=' => 0x18,  // kVK_ANSI_Equal
        '-' => 0x1B,  // kVK_ANSI_Minus
        ']' => 0x1E,  // kVK_ANSI_RightBracket
        '[' => 0x21,  // kVK_ANSI_LeftBracket
        '\'' => 0x27, // kVK_ANSI_Quote
        ';' => 0x29,  // kVK_ANSI_Semicolon
        '\\' => 0x2A, // kVK_ANSI_Backslash
        ',' => 0x2B,  // kVK_ANSI_Comma
        '/' => 0x2C,  // kVK_ANSI_Slash
        '.' => 0x2F,  // kVK_ANSI_Period
        '`' => 0x32,  // kVK_ANSI_Grave

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_positions() {
        // ANSI position codes run a=0, s=1, d=2, f=3 along the home row.
        assert_eq!(key_to_cgkeycode(Key::Char('a')), Some(0x00));
        assert_eq!(key_to_cgkeycode(Key::Char('s')), Some(0x01));
        assert_eq!(key_to_cgkeycode(Key::Char('d')), Some(0x02));
        assert_eq!(key_to_cgkeycode(Key::Char('f')), Some(0x03));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_to_cgkeycode(Key::Enter), Some(0x24));
        assert_eq!(key_to_cgkeycode(Key::Space), Some(0x31));
        assert_eq!(key_to_cgkeycode(Key::Escape), Some(0x35));
        assert_eq!(key_to_cgkeycode(Key::ArrowUp), Some(0x7E));
        assert_eq!(key_to_cgkeycode(Key::F12), Some(0x6F));
    }

    #[test]
    fn test_insert_has_no_macos_equivalent() {
        assert_eq!(key_to_cgkeycode(Key::Insert), None);
    }

    #[test]
    fn test_modifier_codes() {
        assert_eq!(modifier_cgkeycode(Modifier::Shift), 0x38);
        assert_eq!(modifier_cgkeycode(Modifier::Alt), 0x3A);
        assert_eq!(modifier_cgkeycode(Modifier::Ctrl), 0x3B);
    }
}
