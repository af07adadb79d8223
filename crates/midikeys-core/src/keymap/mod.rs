//! Key model and platform translation tables.
//!
//! The canonical representation is the symbolic [`Key`] plus
//! [`ModifierFlags`], parsed from textual key specs.  Platform-specific
//! codes are derived at the emulation boundary through [`KeyMapper`].

pub mod action;
pub mod key;
pub mod macos_cg;
pub mod windows_scan;
pub mod x11_keysym;

pub use action::{KeyAction, KeySpecError};
pub use key::{Key, Modifier, ModifierFlags};

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a [`Key`] to a Windows set-1 scan code.
    ///
    /// Returns `None` if the key has no US-layout position.
    pub fn key_to_windows_scan(key: Key) -> Option<u16> {
        windows_scan::key_to_scan_code(key)
    }

    /// Returns `true` if the key needs the Windows extended-key flag.
    pub fn windows_is_extended(key: Key) -> bool {
        windows_scan::is_extended(key)
    }

    /// Windows scan code for a modifier (left-side by convention).
    pub fn modifier_to_windows_scan(modifier: Modifier) -> u16 {
        windows_scan::modifier_scan_code(modifier)
    }

    /// Translates a [`Key`] to the KeySym name understood by `xdotool`.
    pub fn key_to_keysym_name(key: Key) -> String {
        x11_keysym::key_to_keysym_name(key)
    }

    /// KeySym name for a modifier as `xdotool` spells it.
    pub fn modifier_to_keysym_name(modifier: Modifier) -> &'static str {
        x11_keysym::modifier_keysym_name(modifier)
    }

    /// Translates a [`Key`] to a numeric X11 KeySym value for XTest.
    pub fn key_to_x11_keysym(key: Key) -> u32 {
        x11_keysym::key_to_keysym(key)
    }

    /// Numeric X11 KeySym for a modifier (left-side by convention).
    pub fn modifier_to_x11_keysym(modifier: Modifier) -> u32 {
        x11_keysym::modifier_keysym(modifier)
    }

    /// Translates a [`Key`] to a macOS `CGKeyCode`.
    ///
    /// Returns `None` if the key has no ANSI position.
    pub fn key_to_macos_cgkeycode(key: Key) -> Option<u16> {
        macos_cg::key_to_cgkeycode(key)
    }

    /// macOS `CGKeyCode` for a modifier (left-side by convention).
    pub fn modifier_to_macos_cgkeycode(modifier: Modifier) -> u16 {
        macos_cg::modifier_cgkeycode(modifier)
    }
}
