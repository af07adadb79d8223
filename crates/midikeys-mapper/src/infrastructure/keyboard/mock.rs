//! Mock keyboard backend for unit and integration testing.
//!
//! The real backends inject events into the running desktop session; a
//! test that used them would press keys on the test machine and could not
//! observe the result from Rust.  `MockKeyboardBackend` replaces the OS
//! call with in-memory recording: every press and release is pushed into a
//! `Mutex<Vec<...>>` that assertions can inspect in invocation order.
//!
//! Set `should_fail` to make every call return
//! [`BackendError::Platform`], which exercises the engine's error paths
//! without a broken OS.

use std::sync::Mutex;
use std::time::Duration;

use midikeys_core::KeyAction;

use crate::application::map_events::{BackendError, KeyboardBackend};

/// A call recorded by [`MockKeyboardBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Press(KeyAction),
    Release(KeyAction),
}

/// A backend that records calls instead of touching the OS.
#[derive(Default)]
pub struct MockKeyboardBackend {
    /// Every press and release, in invocation order.
    pub calls: Mutex<Vec<BackendCall>>,
    /// When `true`, every method returns [`BackendError::Platform`].
    pub should_fail: bool,
}

impl MockKeyboardBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The actions passed to `press`, in order.
    pub fn pressed(&self) -> Vec<KeyAction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Press(action) => Some(action),
                BackendCall::Release(_) => None,
            })
            .collect()
    }

    /// The actions passed to `release`, in order.
    pub fn released(&self) -> Vec<KeyAction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Release(action) => Some(action),
                BackendCall::Press(_) => None,
            })
            .collect()
    }
}

impl KeyboardBackend for MockKeyboardBackend {
    /// Records the press, or fails if `should_fail` is set.
    fn press(&self, action: &KeyAction) -> Result<(), BackendError> {
        if self.should_fail {
            return Err(BackendError::Platform("mock failure".into()));
        }
        self.calls.lock().unwrap().push(BackendCall::Press(*action));
        Ok(())
    }

    /// Records the release, or fails if `should_fail` is set.
    fn release(&self, action: &KeyAction) -> Result<(), BackendError> {
        if self.should_fail {
            return Err(BackendError::Platform("mock failure".into()));
        }
        self.calls.lock().unwrap().push(BackendCall::Release(*action));
        Ok(())
    }

    /// Records press then release without sleeping, keeping tests fast.
    fn press_and_release(
        &self,
        action: &KeyAction,
        _hold: Option<Duration>,
    ) -> Result<(), BackendError> {
        self.press(action)?;
        self.release(action)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
