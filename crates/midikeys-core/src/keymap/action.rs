//! Key action parsing and canonical formatting.
//!
//! A key spec is the textual form stored in mapping profiles, e.g. `"g"`,
//! `"f5"`, or `"ctrl+shift+a"`.  Tokens are separated by `+`; every token is
//! either one of the three modifiers (`ctrl`, `alt`, `shift`) or a base key
//! resolvable by [`Key::from_token`].  Parsing is case-insensitive, tolerates
//! surrounding whitespace per token, and is order-insensitive over modifier
//! tokens.  When a spec contains several base-key tokens the last one wins,
//! matching the tolerant behavior users rely on when hand-editing configs.
//!
//! [`KeyAction::format`] is the inverse: it emits the canonical spec with
//! modifiers in the fixed order `ctrl`, `alt`, `shift` followed by the base
//! key, so any parsed action re-serializes to a stable string.

use std::fmt;

use thiserror::Error;

use super::key::{Key, Modifier, ModifierFlags};

/// Errors produced by [`KeyAction::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    /// The spec was empty (or whitespace-only) after trimming.
    #[error("key spec is empty")]
    EmptySpec,

    /// A non-modifier token did not resolve to a known key.
    #[error("unknown key token '{0}' in key spec")]
    UnknownKeyToken(String),

    /// The spec contained only modifiers and no base key.
    #[error("key spec has no base key, only modifiers")]
    MissingBaseKey,
}

/// A parsed keyboard action: one base key plus a set of modifiers.
///
/// Equality and hashing are structural, which is what lets the mapping
/// engine keep actions in its held-key bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyAction {
    pub base: Key,
    pub modifiers: ModifierFlags,
}

impl KeyAction {
    /// Creates an action with no modifiers.
    pub fn bare(base: Key) -> Self {
        Self {
            base,
            modifiers: ModifierFlags::NONE,
        }
    }

    /// Parses a textual key spec.
    ///
    /// # Errors
    ///
    /// - [`KeySpecError::EmptySpec`] when the input trims to nothing.
    /// - [`KeySpecError::UnknownKeyToken`] when a token is neither a
    ///   modifier nor a known key (a trailing `+` produces this for the
    ///   empty token it leaves behind).
    /// - [`KeySpecError::MissingBaseKey`] when every token is a modifier.
    pub fn parse(spec: &str) -> Result<KeyAction, KeySpecError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(KeySpecError::EmptySpec);
        }

        let mut modifiers = ModifierFlags::NONE;
        let mut base = None;

        for token in trimmed.split('+') {
            let token = token.trim();
            if let Some(modifier) = Modifier::from_token(token) {
                modifiers.insert(modifier);
            } else if let Some(key) = Key::from_token(token) {
                base = Some(key);
            } else {
                return Err(KeySpecError::UnknownKeyToken(token.to_string()));
            }
        }

        match base {
            Some(base) => Ok(KeyAction { base, modifiers }),
            None => Err(KeySpecError::MissingBaseKey),
        }
    }

    /// Canonical re-serialization of this action.
    ///
    /// `parse(format(a))` always yields an action equal to `a`.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers.iter() {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.base)
    }
}
