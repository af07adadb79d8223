//! Windows keyboard injection via the SendInput API.
//!
//! Injects at the scan-code level (`KEYEVENTF_SCANCODE`) rather than as
//! virtual-key messages.  Games that read hardware state through
//! DirectInput-style APIs ignore higher-level synthetic input; scan-code
//! injection is the lowest layer reachable without a kernel driver, and
//! those games see it as real key travel.

#![cfg(target_os = "windows")]

use midikeys_core::{KeyAction, KeyMapper, Modifier};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP,
    KEYEVENTF_SCANCODE, VIRTUAL_KEY,
};

use crate::application::map_events::{BackendError, KeyboardBackend};

/// Windows implementation of [`KeyboardBackend`] using SendInput.
pub struct SendInputBackend;

impl SendInputBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardBackend for SendInputBackend {
    fn press(&self, action: &KeyAction) -> Result<(), BackendError> {
        // Resolve the base key before touching the modifiers so an
        // unsupported key cannot leave a half-pressed chord.
        let scan = KeyMapper::key_to_windows_scan(action.base)
            .ok_or(BackendError::UnsupportedKey(action.base))?;
        for modifier in action.modifiers.iter() {
            send_scan(KeyMapper::modifier_to_windows_scan(modifier), false, false);
        }
        send_scan(scan, KeyMapper::windows_is_extended(action.base), false);
        Ok(())
    }

    fn release(&self, action: &KeyAction) -> Result<(), BackendError> {
        let scan = KeyMapper::key_to_windows_scan(action.base)
            .ok_or(BackendError::UnsupportedKey(action.base))?;
        send_scan(scan, KeyMapper::windows_is_extended(action.base), true);
        let modifiers: Vec<Modifier> = action.modifiers.iter().collect();
        for modifier in modifiers.into_iter().rev() {
            send_scan(KeyMapper::modifier_to_windows_scan(modifier), false, true);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sendinput"
    }
}

fn send_scan(scan: u16, extended: bool, key_up: bool) {
    let mut flags = KEYEVENTF_SCANCODE;
    if extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                // wVk stays zero: with KEYEVENTF_SCANCODE the scan code is
                // authoritative and the system derives the virtual key.
                wVk: VIRTUAL_KEY(0),
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    // SAFETY: input is a valid INPUT structure on the stack
    unsafe {
        windows::Win32::UI::Input::KeyboardAndMouse::SendInput(
            &[input],
            std::mem::size_of::<INPUT>() as i32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midikeys_core::Key;

    #[test]
    fn test_press_rejects_key_without_scan_code_before_injecting() {
        // A character outside the US layout has no scan code; the error must
        // surface before any modifier event reaches the OS.
        let backend = SendInputBackend::new();
        let action = KeyAction {
            base: Key::Char('é'),
            modifiers: midikeys_core::ModifierFlags(midikeys_core::ModifierFlags::CTRL),
        };

        let result = backend.press(&action);

        assert!(matches!(result, Err(BackendError::UnsupportedKey(_))));
    }

    #[test]
    fn test_backend_name_is_sendinput() {
        assert_eq!(SendInputBackend::new().name(), "sendinput");
    }
}
