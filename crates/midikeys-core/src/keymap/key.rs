//! Symbolic key identifiers and the modifier bit set.
//!
//! A [`Key`] names a key on the computer keyboard independently of any
//! platform code.  Platform-specific values (Windows scan codes, X11 KeySyms,
//! macOS CGKeyCodes) are derived from it at the emulation boundary by the
//! sibling table modules.
//!
//! # Canonical token names
//!
//! Every key has exactly one canonical lowercase token used in key specs and
//! in the configuration file: `"a"`, `"f5"`, `"page_up"`, `"esc"`, ….  Parsing
//! additionally accepts a few aliases (`"escape"`, `"return"`, `"pageup"`, …)
//! but [`Key::token`] and `Display` always emit the canonical form, so a
//! re-serialized config is stable.

use std::fmt;

/// A symbolic, platform-independent keyboard key.
///
/// Printable characters are carried as [`Key::Char`] (stored lowercase);
/// everything else is a named variant.  Modifier keys are *not* part of this
/// enum; they travel separately as [`ModifierFlags`] on a key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Editing / whitespace
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,

    // Navigation cluster
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    /// A single printable character, stored in lowercase ASCII form where
    /// applicable (`'a'`, `'3'`, `'-'`, …).
    Char(char),
}

/// Canonical token name for each named key, in parse-table order.
const NAMED_KEYS: &[(&str, Key)] = &[
    ("space", Key::Space),
    ("enter", Key::Enter),
    ("esc", Key::Escape),
    ("tab", Key::Tab),
    ("backspace", Key::Backspace),
    ("delete", Key::Delete),
    ("insert", Key::Insert),
    ("home", Key::Home),
    ("end", Key::End),
    ("page_up", Key::PageUp),
    ("page_down", Key::PageDown),
    ("up", Key::ArrowUp),
    ("down", Key::ArrowDown),
    ("left", Key::ArrowLeft),
    ("right", Key::ArrowRight),
    ("f1", Key::F1),
    ("f2", Key::F2),
    ("f3", Key::F3),
    ("f4", Key::F4),
    ("f5", Key::F5),
    ("f6", Key::F6),
    ("f7", Key::F7),
    ("f8", Key::F8),
    ("f9", Key::F9),
    ("f10", Key::F10),
    ("f11", Key::F11),
    ("f12", Key::F12),
];

/// Accepted aliases, normalized to the same variants as their canonical names.
const KEY_ALIASES: &[(&str, Key)] = &[
    ("escape", Key::Escape),
    ("return", Key::Enter),
    ("del", Key::Delete),
    ("ins", Key::Insert),
    ("pageup", Key::PageUp),
    ("pagedown", Key::PageDown),
];

impl Key {
    /// Resolves a single key-spec token (already split on `+`) to a [`Key`].
    ///
    /// Matching is case-insensitive.  One-character tokens become
    /// [`Key::Char`]; multi-character tokens must be a canonical name or an
    /// alias.  Returns `None` for unrecognized tokens, whitespace-only
    /// characters, and control characters.
    pub fn from_token(token: &str) -> Option<Key> {
        let normalized = token.to_lowercase();

        for &(name, key) in NAMED_KEYS.iter().chain(KEY_ALIASES) {
            if normalized == name {
                return Some(key);
            }
        }

        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() && !c.is_control() => Some(Key::Char(c)),
            _ => None,
        }
    }

    /// Returns the canonical spec token for this key.
    ///
    /// For [`Key::Char`] the character itself is the token, so this returns a
    /// `String`; named keys yield their fixed lowercase name.
    pub fn token(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            named => {
                // NAMED_KEYS covers every non-Char variant exactly once.
                NAMED_KEYS
                    .iter()
                    .find(|(_, k)| k == named)
                    .map(|(name, _)| (*name).to_string())
                    .unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One of the three recognized modifier keys.
///
/// The declaration order is the canonical press order: modifiers are pressed
/// `ctrl`, `alt`, `shift` and released in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    /// Resolves a spec token to a modifier, case-insensitively.
    pub fn from_token(token: &str) -> Option<Modifier> {
        match token.to_lowercase().as_str() {
            "ctrl" => Some(Modifier::Ctrl),
            "alt" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            _ => None,
        }
    }

    /// The canonical lowercase token for this modifier.
    pub fn token(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Compact set of active modifiers.
///
/// Bit layout:
/// - Bit 0: Ctrl
/// - Bit 1: Alt
/// - Bit 2: Shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierFlags(pub u8);

impl ModifierFlags {
    pub const CTRL: u8 = 1 << 0;
    pub const ALT: u8 = 1 << 1;
    pub const SHIFT: u8 = 1 << 2;

    /// The empty modifier set.
    pub const NONE: ModifierFlags = ModifierFlags(0);

    /// Returns `true` if no modifier is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if Ctrl is active.
    pub fn ctrl(&self) -> bool {
        self.0 & Self::CTRL != 0
    }

    /// Returns `true` if Alt is active.
    pub fn alt(&self) -> bool {
        self.0 & Self::ALT != 0
    }

    /// Returns `true` if Shift is active.
    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    /// Adds a modifier to the set.  Inserting an already-present modifier is
    /// a no-op, which gives key-spec parsing its duplicate tolerance.
    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= match modifier {
            Modifier::Ctrl => Self::CTRL,
            Modifier::Alt => Self::ALT,
            Modifier::Shift => Self::SHIFT,
        };
    }

    /// Returns `true` if the given modifier is in the set.
    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl(),
            Modifier::Alt => self.alt(),
            Modifier::Shift => self.shift(),
        }
    }

    /// Iterates the active modifiers in canonical press order
    /// (ctrl, alt, shift).
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        [Modifier::Ctrl, Modifier::Alt, Modifier::Shift]
            .into_iter()
            .filter(|m| self.contains(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_resolves_named_keys_case_insensitively() {
        // Arrange
        let cases = [
            ("space", Key::Space),
            ("ENTER", Key::Enter),
            ("Esc", Key::Escape),
            ("f1", Key::F1),
            ("F12", Key::F12),
            ("page_up", Key::PageUp),
            ("up", Key::ArrowUp),
        ];

        for (token, expected) in cases {
            // Act
            let key = Key::from_token(token);

            // Assert
            assert_eq!(key, Some(expected), "token {token:?}");
        }
    }

    #[test]
    fn test_from_token_accepts_aliases() {
        assert_eq!(Key::from_token("escape"), Some(Key::Escape));
        assert_eq!(Key::from_token("return"), Some(Key::Enter));
        assert_eq!(Key::from_token("pageup"), Some(Key::PageUp));
        assert_eq!(Key::from_token("PageDown"), Some(Key::PageDown));
        assert_eq!(Key::from_token("del"), Some(Key::Delete));
        assert_eq!(Key::from_token("ins"), Some(Key::Insert));
    }

    #[test]
    fn test_from_token_single_characters_become_lowercase_char() {
        assert_eq!(Key::from_token("a"), Some(Key::Char('a')));
        assert_eq!(Key::from_token("A"), Some(Key::Char('a')));
        assert_eq!(Key::from_token("7"), Some(Key::Char('7')));
        assert_eq!(Key::from_token("-"), Some(Key::Char('-')));
        assert_eq!(Key::from_token("["), Some(Key::Char('[')));
    }

    #[test]
    fn test_from_token_rejects_unknown_and_blank_tokens() {
        assert_eq!(Key::from_token(""), None);
        assert_eq!(Key::from_token(" "), None);
        assert_eq!(Key::from_token("notakey"), None);
        assert_eq!(Key::from_token("f13"), None);
    }

    #[test]
    fn test_token_round_trips_through_from_token() {
        let keys = [
            Key::Space,
            Key::Enter,
            Key::Escape,
            Key::PageUp,
            Key::ArrowLeft,
            Key::F11,
            Key::Char('q'),
            Key::Char(';'),
        ];

        for key in keys {
            // Act
            let token = key.token();
            let back = Key::from_token(&token);

            // Assert
            assert_eq!(back, Some(key), "token {token:?} did not round-trip");
        }
    }

    #[test]
    fn test_modifier_flags_insert_is_idempotent() {
        // Arrange
        let mut flags = ModifierFlags::NONE;

        // Act
        flags.insert(Modifier::Shift);
        flags.insert(Modifier::Shift);

        // Assert
        assert!(flags.shift());
        assert!(!flags.ctrl());
        assert_eq!(flags.iter().count(), 1);
    }

    #[test]
    fn test_modifier_flags_iterate_in_canonical_press_order() {
        // Arrange
        let mut flags = ModifierFlags::NONE;
        flags.insert(Modifier::Shift);
        flags.insert(Modifier::Ctrl);
        flags.insert(Modifier::Alt);

        // Act
        let order: Vec<Modifier> = flags.iter().collect();

        // Assert
        assert_eq!(order, vec![Modifier::Ctrl, Modifier::Alt, Modifier::Shift]);
    }
}
