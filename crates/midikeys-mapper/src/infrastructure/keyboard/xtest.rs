//! Linux keyboard injection through the XTest extension.
//!
//! Fallback for hosts without `xdotool`.  Opens one connection to the X
//! server for the lifetime of the backend and synthesizes key events with
//! `XTestFakeKeyEvent`; the focused application cannot distinguish them
//! from physical input.

#![cfg(target_os = "linux")]

use std::os::raw::{c_int, c_uint};
use std::ptr;

use midikeys_core::{KeyAction, KeyMapper, Modifier};
use x11::{xlib, xtest};

use crate::application::map_events::{BackendError, KeyboardBackend};

/// XTest implementation of [`KeyboardBackend`].
pub struct XTestBackend {
    display: *mut xlib::Display,
}

// SAFETY: the engine task is the only caller and backend calls are strictly
// serialized, so the raw Display connection is never used concurrently.
unsafe impl Send for XTestBackend {}
unsafe impl Sync for XTestBackend {}

impl XTestBackend {
    /// Connects to the display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Platform`] when no X display is reachable.
    pub fn new() -> Result<Self, BackendError> {
        // SAFETY: a NULL name means "use the DISPLAY environment variable".
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(BackendError::Platform(
                "cannot open X display (is DISPLAY set?)".to_string(),
            ));
        }
        Ok(Self { display })
    }

    fn keycode_for(&self, keysym: u32) -> Result<c_uint, BackendError> {
        // SAFETY: display is a live connection owned by self.
        let keycode = unsafe { xlib::XKeysymToKeycode(self.display, keysym.into()) };
        if keycode == 0 {
            return Err(BackendError::Platform(format!(
                "keysym {keysym:#x} has no keycode in the server keymap"
            )));
        }
        Ok(keycode as c_uint)
    }

    fn fake_key(&self, keycode: c_uint, is_press: bool) {
        // SAFETY: display is live and keycode came from XKeysymToKeycode.
        unsafe {
            xtest::XTestFakeKeyEvent(self.display, keycode, is_press as c_int, 0);
        }
    }

    fn flush(&self) {
        // SAFETY: display is live.
        unsafe {
            xlib::XFlush(self.display);
        }
    }
}

impl KeyboardBackend for XTestBackend {
    fn press(&self, action: &KeyAction) -> Result<(), BackendError> {
        // Resolve every keycode before faking any event; a failed lookup
        // must not leave a half-pressed chord.
        let base = self.keycode_for(KeyMapper::key_to_x11_keysym(action.base))?;
        let modifiers = action
            .modifiers
            .iter()
            .map(|m| self.keycode_for(KeyMapper::modifier_to_x11_keysym(m)))
            .collect::<Result<Vec<_>, _>>()?;

        for code in &modifiers {
            self.fake_key(*code, true);
        }
        self.fake_key(base, true);
        self.flush();
        Ok(())
    }

    fn release(&self, action: &KeyAction) -> Result<(), BackendError> {
        let base = self.keycode_for(KeyMapper::key_to_x11_keysym(action.base))?;
        let modifiers: Vec<Modifier> = action.modifiers.iter().collect();
        let codes = modifiers
            .into_iter()
            .rev()
            .map(|m| self.keycode_for(KeyMapper::modifier_to_x11_keysym(m)))
            .collect::<Result<Vec<_>, _>>()?;

        self.fake_key(base, false);
        for code in &codes {
            self.fake_key(*code, false);
        }
        self.flush();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "xtest"
    }
}

impl Drop for XTestBackend {
    fn drop(&mut self) {
        // SAFETY: display was opened by new() and is closed exactly once.
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}
