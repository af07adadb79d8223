//! macOS keyboard injection via Core Graphics events.
//!
//! Posts `CGEvent` keyboard events at the HID tap, below the window
//! server, which is what games sampling raw HID state respond to.
//! Modifier state rides on the event's flags rather than on separate
//! modifier key events; that is the Core Graphics convention.
//!
//! Requires the accessibility permission.  Without it, event creation
//! fails and the error surfaces per call.

#![cfg(target_os = "macos")]

use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use midikeys_core::{KeyAction, KeyMapper};

use crate::application::map_events::{BackendError, KeyboardBackend};

/// Core Graphics implementation of [`KeyboardBackend`].
pub struct CoreGraphicsBackend;

impl CoreGraphicsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoreGraphicsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardBackend for CoreGraphicsBackend {
    fn press(&self, action: &KeyAction) -> Result<(), BackendError> {
        post_key(action, true)
    }

    fn release(&self, action: &KeyAction) -> Result<(), BackendError> {
        post_key(action, false)
    }

    fn name(&self) -> &'static str {
        "coregraphics"
    }
}

fn post_key(action: &KeyAction, keydown: bool) -> Result<(), BackendError> {
    let keycode = KeyMapper::key_to_macos_cgkeycode(action.base)
        .ok_or(BackendError::UnsupportedKey(action.base))?;
    // CGEvent::new_keyboard_event consumes the source, so one is created
    // per injected event.
    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| BackendError::Platform("cannot create CGEventSource".to_string()))?;
    let event = CGEvent::new_keyboard_event(source, keycode, keydown)
        .map_err(|_| BackendError::Platform("cannot create keyboard CGEvent".to_string()))?;
    event.set_flags(event_flags(action));
    event.post(CGEventTapLocation::HID);
    Ok(())
}

fn event_flags(action: &KeyAction) -> CGEventFlags {
    let mut flags = CGEventFlags::CGEventFlagNull;
    if action.modifiers.ctrl() {
        flags |= CGEventFlags::CGEventFlagControl;
    }
    if action.modifiers.alt() {
        flags |= CGEventFlags::CGEventFlagAlternate;
    }
    if action.modifiers.shift() {
        flags |= CGEventFlags::CGEventFlagShift;
    }
    flags
}
