//! Symbolic key to X11 KeySym translation for the Linux backends.
//!
//! Two directions are provided because the two Linux backends speak
//! different dialects of the same vocabulary:
//!
//! - [`key_to_keysym_name`] produces the textual KeySym name that `xdotool
//!   keydown`/`keyup` expects (`"a"`, `"Return"`, `"Page_Up"`).
//! - [`key_to_keysym`] produces the numeric KeySym value that
//!   `XKeysymToKeycode` expects when injecting through the XTest extension.
//!
//! KeySym values and names come from X11/keysymdef.h.  Letters and most
//! punctuation use their Latin-1 codepoint as the KeySym value; characters
//! outside Latin-1 use the standard `0x01000000 | codepoint` Unicode KeySym
//! form.  Letter keys always use the lowercase KeySym; the X server applies
//! Shift itself when the modifier is held.

use super::key::{Key, Modifier};

/// Textual KeySym name for `xdotool`.
///
/// Single characters pass through for letters and digits; punctuation uses
/// its proper KeySym name because `XStringToKeysym` does not resolve raw
/// punctuation characters.
pub fn key_to_keysym_name(key: Key) -> String {
    match key {
        Key::Char(c) => char_keysym_name(c),

        Key::Space => "space".to_string(),
        Key::Enter => "Return".to_string(),
        Key::Escape => "Escape".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Backspace => "BackSpace".to_string(),
        Key::Delete => "Delete".to_string(),
        Key::Insert => "Insert".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        Key::PageUp => "Page_Up".to_string(),
        Key::PageDown => "Page_Down".to_string(),
        Key::ArrowUp => "Up".to_string(),
        Key::ArrowDown => "Down".to_string(),
        Key::ArrowLeft => "Left".to_string(),
        Key::ArrowRight => "Right".to_string(),

        Key::F1 => "F1".to_string(),
        Key::F2 => "F2".to_string(),
        Key::F3 => "F3".to_string(),
        Key::F4 => "F4".to_string(),
        Key::F5 => "F5".to_string(),
        Key::F6 => "F6".to_string(),
        Key::F7 => "F7".to_string(),
        Key::F8 => "F8".to_string(),
        Key::F9 => "F9".to_string(),
        Key::F10 => "F10".to_string(),
        Key::F11 => "F11".to_string(),
        Key::F12 => "F12".to_string(),
    }
}

/// Textual KeySym name for a modifier, left-side by convention.
pub fn modifier_keysym_name(modifier: Modifier) -> &'static str {
    match modifier {
        Modifier::Ctrl => "ctrl",
        Modifier::Alt => "alt",
        Modifier::Shift => "shift",
    }
}

/// Numeric KeySym value for XTest injection.
///
/// Never returns `None` for `Char`: Latin-1 characters use their codepoint
/// and everything else falls back to the Unicode KeySym form, leaving it to
/// the X server's keymap whether a KeyCode exists for it.
pub fn key_to_keysym(key: Key) -> u32 {
    match key {
        Key::Char(c) => char_keysym(c),

        Key::Space => 0x0020,     // XK_space
        Key::Enter => 0xFF0D,     // XK_Return
        Key::Escape => 0xFF1B,    // XK_Escape
        Key::Tab => 0xFF09,       // XK_Tab
        Key::Backspace => 0xFF08, // XK_BackSpace
        Key::Delete => 0xFFFF,    // XK_Delete
        Key::Insert => 0xFF63,    // XK_Insert
        Key::Home => 0xFF50,      // XK_Home
        Key::End => 0xFF57,       // XK_End
        Key::PageUp => 0xFF55,    // XK_Prior
        Key::PageDown => 0xFF56,  // XK_Next
        Key::ArrowUp => 0xFF52,   // XK_Up
        Key::ArrowDown => 0xFF54, // XK_Down
        Key::ArrowLeft => 0xFF51, // XK_Left
        Key::ArrowRight => 0xFF53, // XK_Right

        Key::F1 => 0xFFBE,
        Key::F2 => 0xFFBF,
        Key::F3 => 0xFFC0,
        Key::F4 => 0xFFC1,
        Key::F5 => 0xFFC2,
        Key::F6 => 0xFFC3,
        Key::F7 => 0xFFC4,
        Key::F8 => 0xFFC5,
        Key::F9 => 0xFFC6,
        Key::F10 => 0xFFC7,
        Key::F11 => 0xFFC8,
        Key::F12 => 0xFFC9,
    }
}

/// Numeric KeySym value for a modifier, left-side by convention.
pub fn modifier_keysym(modifier: Modifier) -> u32 {
    match modifier {
        Modifier::Ctrl => 0xFFE3,  // XK_Control_L
        Modifier::Alt => 0xFFE9,   // XK_Alt_L
        Modifier::Shift => 0xFFE1, // XK_Shift_L
    }
}

fn char_keysym_name(c: char) -> String {
    match c {
        '-' => "minus".to_string(),
        '=' => "equal".to_string(),
        '[' => "bracketleft".to_string(),
        ']' => "bracketright".to_string(),
        '\\' => "backslash".to_string(),
        ';' => "semicolon".to_string(),
        '\'' => "apostrophe".to_string(),
        '`' => "grave".to_string(),
        ',' => "comma".to_string(),
        '.' => "period".to_string(),
        '/' => "slash".to_string(),
        other => other.to_string(),
    }
}

fn char_keysym(c: char) -> u32 {
    let cp = c as u32;
    if cp <= 0xFF {
        cp
    } else {
        0x0100_0000 | cp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_pass_through_as_names_and_ascii_keysyms() {
        assert_eq!(key_to_keysym_name(Key::Char('a')), "a");
        assert_eq!(key_to_keysym_name(Key::Char('7')), "7");
        assert_eq!(key_to_keysym(Key::Char('a')), 0x0061);
        assert_eq!(key_to_keysym(Key::Char('z')), 0x007A);
        assert_eq!(key_to_keysym(Key::Char('0')), 0x0030);
    }

    #[test]
    fn test_punctuation_uses_keysym_names() {
        assert_eq!(key_to_keysym_name(Key::Char('-')), "minus");
        assert_eq!(key_to_keysym_name(Key::Char(';')), "semicolon");
        assert_eq!(key_to_keysym_name(Key::Char('\'')), "apostrophe");
        assert_eq!(key_to_keysym_name(Key::Char('/')), "slash");
    }

    #[test]
    fn test_named_keys_use_xdotool_vocabulary() {
        assert_eq!(key_to_keysym_name(Key::Enter), "Return");
        assert_eq!(key_to_keysym_name(Key::Escape), "Escape");
        assert_eq!(key_to_keysym_name(Key::Backspace), "BackSpace");
        assert_eq!(key_to_keysym_name(Key::PageUp), "Page_Up");
        assert_eq!(key_to_keysym_name(Key::ArrowLeft), "Left");
    }

    #[test]
    fn test_named_keys_match_keysymdef_values() {
        assert_eq!(key_to_keysym(Key::Enter), 0xFF0D);
        assert_eq!(key_to_keysym(Key::Escape), 0xFF1B);
        assert_eq!(key_to_keysym(Key::F1), 0xFFBE);
        assert_eq!(key_to_keysym(Key::F12), 0xFFC9);
        assert_eq!(key_to_keysym(Key::PageDown), 0xFF56);
    }

    #[test]
    fn test_non_latin1_characters_use_unicode_keysym_form() {
        assert_eq!(key_to_keysym(Key::Char('€')), 0x0100_0000 | 0x20AC);
    }

    #[test]
    fn test_modifier_keysyms_are_left_side() {
        assert_eq!(modifier_keysym(Modifier::Ctrl), 0xFFE3);
        assert_eq!(modifier_keysym(Modifier::Shift), 0xFFE1);
        assert_eq!(modifier_keysym(Modifier::Alt), 0xFFE9);
    }
}
