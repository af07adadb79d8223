//! Linux keyboard injection by shelling out to `xdotool`.
//!
//! Preferred Linux backend: it needs no elevated privileges and behaves
//! well across X11 session setups.  Commands are chained into a single
//! `xdotool` invocation per press or release so a chord costs one process
//! spawn, not one per key.

#![cfg(target_os = "linux")]

use std::process::Command;
use std::time::Duration;

use midikeys_core::{KeyAction, KeyMapper, Modifier};

use crate::application::map_events::{BackendError, KeyboardBackend};

/// Shells out to the `xdotool` binary for key injection.
pub struct XdotoolBackend;

impl XdotoolBackend {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` when the `xdotool` binary is on `PATH` and runnable.
    pub fn is_available() -> bool {
        Command::new("xdotool")
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}

impl Default for XdotoolBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardBackend for XdotoolBackend {
    fn press(&self, action: &KeyAction) -> Result<(), BackendError> {
        let mut args: Vec<String> = Vec::new();
        for modifier in action.modifiers.iter() {
            args.push("keydown".to_string());
            args.push(KeyMapper::modifier_to_keysym_name(modifier).to_string());
        }
        args.push("keydown".to_string());
        args.push(KeyMapper::key_to_keysym_name(action.base));
        run_xdotool(&args)
    }

    fn release(&self, action: &KeyAction) -> Result<(), BackendError> {
        let mut args: Vec<String> = vec![
            "keyup".to_string(),
            KeyMapper::key_to_keysym_name(action.base),
        ];
        let modifiers: Vec<Modifier> = action.modifiers.iter().collect();
        for modifier in modifiers.into_iter().rev() {
            args.push("keyup".to_string());
            args.push(KeyMapper::modifier_to_keysym_name(modifier).to_string());
        }
        run_xdotool(&args)
    }

    fn press_and_release(
        &self,
        action: &KeyAction,
        hold: Option<Duration>,
    ) -> Result<(), BackendError> {
        match hold {
            // xdotool taps the whole combo natively in one invocation.
            None => run_xdotool(&["key".to_string(), combo_spec(action)]),
            Some(delay) => {
                self.press(action)?;
                std::thread::sleep(delay);
                self.release(action)
            }
        }
    }

    fn name(&self) -> &'static str {
        "xdotool"
    }
}

/// Formats an action in xdotool's `key` syntax, e.g. `ctrl+shift+a`.
fn combo_spec(action: &KeyAction) -> String {
    let mut parts: Vec<String> = action
        .modifiers
        .iter()
        .map(|m| KeyMapper::modifier_to_keysym_name(m).to_string())
        .collect();
    parts.push(KeyMapper::key_to_keysym_name(action.base));
    parts.join("+")
}

fn run_xdotool(args: &[String]) -> Result<(), BackendError> {
    let output = Command::new("xdotool")
        .args(args)
        .output()
        .map_err(|e| BackendError::ToolFailed {
            tool: "xdotool",
            detail: e.to_string(),
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BackendError::ToolFailed {
            tool: "xdotool",
            detail: format!("{}: {}", output.status, stderr.trim()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use midikeys_core::Key;

    #[test]
    fn test_combo_spec_joins_modifiers_and_base() {
        let action = KeyAction::parse("ctrl+shift+a").unwrap();
        assert_eq!(combo_spec(&action), "ctrl+shift+a");
    }

    #[test]
    fn test_combo_spec_uses_keysym_names_for_special_keys() {
        let action = KeyAction::parse("alt+page_up").unwrap();
        assert_eq!(combo_spec(&action), "alt+Page_Up");
    }

    #[test]
    fn test_combo_spec_bare_key_has_no_separator() {
        let action = KeyAction::bare(Key::Space);
        assert_eq!(combo_spec(&action), "space");
    }

    #[test]
    fn test_is_available_does_not_panic_without_binary() {
        // Whether xdotool exists depends on the host; the probe must return
        // a plain bool either way.
        let _ = XdotoolBackend::is_available();
    }
}
