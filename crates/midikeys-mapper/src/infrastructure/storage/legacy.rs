//! One-shot import of the legacy JSON configuration.
//!
//! Earlier releases stored their mapping in a `config.json`, in two
//! generations of shape:
//!
//! ```json
//! { "profiles": { "default": { "midi_map": { "60": "a" },
//!                              "velocity_threshold": 0 } },
//!   "current_profile": "default" }
//! ```
//!
//! and, older still, a flat document that is the body of a single profile:
//!
//! ```json
//! { "midi_map": { "60": "a" }, "velocity_threshold": 0 }
//! ```
//!
//! The import is deliberately forgiving: entries that do not validate
//! (note out of 0-127, unparseable key spec) are skipped with a warning
//! and the rest of the file is still used.  Unknown fields such as the old
//! `description` string are ignored.  Nothing here is fatal; when the file
//! is unusable the caller proceeds with the built-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use midikeys_core::{KeyAction, MapperConfig, ProfileConfig};
use serde_json::Value;
use tracing::{info, warn};

/// The legacy config file that may sit beside the TOML config.
pub fn legacy_path_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) => dir.join("config.json"),
        None => PathBuf::from("config.json"),
    }
}

/// Imports a legacy JSON config, returning `None` when the file is absent
/// or unusable.
pub fn import_legacy(path: &Path) -> Option<MapperConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("cannot read legacy config {}: {e}", path.display());
            return None;
        }
    };

    let document: Value = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            warn!("cannot parse legacy config {}: {e}", path.display());
            return None;
        }
    };

    let mut profiles: BTreeMap<String, ProfileConfig> = BTreeMap::new();
    let mut current_profile = "default".to_string();

    if let Some(raw_profiles) = document.get("profiles").and_then(Value::as_object) {
        for (name, body) in raw_profiles {
            if name.trim().is_empty() {
                warn!("skipping legacy profile with empty name");
                continue;
            }
            profiles.insert(name.clone(), profile_from_value(name, body));
        }
        if let Some(name) = document.get("current_profile").and_then(Value::as_str) {
            current_profile = name.to_string();
        }
    } else {
        // Flat pre-profiles shape: the document itself is one profile.
        profiles.insert(
            current_profile.clone(),
            profile_from_value(&current_profile, &document),
        );
    }

    if profiles.values().all(|p| p.midi_map.is_empty()) {
        warn!("legacy config {} contains no usable mappings", path.display());
        return None;
    }
    if !profiles.contains_key(&current_profile) {
        // First remaining name in sorted order; profiles is non-empty here.
        current_profile = profiles.keys().next().cloned().unwrap_or_default();
    }

    let mapped: usize = profiles.values().map(|p| p.midi_map.len()).sum();
    info!(
        "imported legacy config {}: {} profile(s), {mapped} mapping(s)",
        path.display(),
        profiles.len()
    );
    Some(MapperConfig {
        profiles,
        current_profile,
    })
}

/// Extracts one profile body, dropping entries that do not validate.
fn profile_from_value(name: &str, body: &Value) -> ProfileConfig {
    let mut midi_map = BTreeMap::new();
    if let Some(raw_map) = body.get("midi_map").and_then(Value::as_object) {
        for (note, action) in raw_map {
            let Ok(parsed_note) = note.parse::<u8>() else {
                warn!("profile {name:?}: skipping invalid note {note:?}");
                continue;
            };
            if parsed_note > 127 {
                warn!("profile {name:?}: skipping out-of-range note {parsed_note}");
                continue;
            }
            let Some(spec) = action.as_str() else {
                warn!("profile {name:?}: skipping non-string mapping for note {note}");
                continue;
            };
            if let Err(e) = KeyAction::parse(spec) {
                warn!("profile {name:?}: skipping note {note} with bad key spec {spec:?}: {e}");
                continue;
            }
            midi_map.insert(parsed_note.to_string(), spec.to_string());
        }
    }

    let velocity_threshold = match body.get("velocity_threshold") {
        None => 0,
        Some(value) => match value.as_u64() {
            Some(threshold) if threshold <= 127 => threshold as u8,
            _ => {
                warn!("profile {name:?}: ignoring invalid velocity threshold {value}");
                0
            }
        },
    };

    ProfileConfig {
        midi_map,
        velocity_threshold,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_json(tag: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("midikeys_legacy_{}_{tag}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_profiles_shape() {
        // Arrange
        let path = temp_json(
            "profiles",
            r#"{
                "profiles": {
                    "default": { "midi_map": { "60": "a", "61": "ctrl+b" },
                                 "velocity_threshold": 30 },
                    "synth":   { "midi_map": { "72": "space" } }
                },
                "current_profile": "synth",
                "description": "MIDI note number (0-127) maps to keyboard key"
            }"#,
        );

        // Act
        let cfg = import_legacy(&path).expect("import should succeed");

        // Assert
        assert_eq!(cfg.current_profile, "synth");
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(cfg.profiles["default"].midi_map["60"], "a");
        assert_eq!(cfg.profiles["default"].midi_map["61"], "ctrl+b");
        assert_eq!(cfg.profiles["default"].velocity_threshold, 30);
        assert_eq!(cfg.profiles["synth"].midi_map["72"], "space");
        assert_eq!(cfg.profiles["synth"].velocity_threshold, 0);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_import_flat_shape_becomes_default_profile() {
        // Arrange
        let path = temp_json(
            "flat",
            r#"{ "midi_map": { "60": "a", "62": "s" }, "velocity_threshold": 10 }"#,
        );

        // Act
        let cfg = import_legacy(&path).expect("import should succeed");

        // Assert
        assert_eq!(cfg.current_profile, "default");
        assert_eq!(cfg.profiles.len(), 1);
        assert_eq!(cfg.profiles["default"].midi_map.len(), 2);
        assert_eq!(cfg.profiles["default"].velocity_threshold, 10);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_import_skips_invalid_entries_and_keeps_the_rest() {
        // Arrange: bad note, out-of-range note, bad key spec, non-string
        let path = temp_json(
            "invalid_entries",
            r#"{ "midi_map": {
                    "60": "a",
                    "x": "b",
                    "200": "c",
                    "61": "ctrl+",
                    "62": 7
                 },
                 "velocity_threshold": 9000 }"#,
        );

        // Act
        let cfg = import_legacy(&path).expect("the one valid entry survives");

        // Assert
        let profile = &cfg.profiles["default"];
        assert_eq!(profile.midi_map.len(), 1);
        assert_eq!(profile.midi_map["60"], "a");
        assert_eq!(profile.velocity_threshold, 0, "invalid threshold drops to 0");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_import_unknown_current_profile_falls_back_to_first() {
        let path = temp_json(
            "bad_current",
            r#"{ "profiles": { "b": { "midi_map": { "60": "a" } },
                               "a": { "midi_map": { "61": "b" } } },
                 "current_profile": "gone" }"#,
        );

        let cfg = import_legacy(&path).expect("import should succeed");

        assert_eq!(cfg.current_profile, "a", "first name in sorted order");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_import_missing_file_returns_none() {
        let path = PathBuf::from("/nonexistent/legacy/config.json");
        assert!(import_legacy(&path).is_none());
    }

    #[test]
    fn test_import_unparseable_json_returns_none() {
        let path = temp_json("garbage", "{ not json at all");
        assert!(import_legacy(&path).is_none());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_import_without_usable_mappings_returns_none() {
        let path = temp_json(
            "empty",
            r#"{ "profiles": { "default": { "midi_map": {} } } }"#,
        );
        assert!(import_legacy(&path).is_none());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_legacy_path_sits_beside_the_toml_config() {
        let toml = PathBuf::from("/home/user/.config/midikeys/config.toml");
        assert_eq!(
            legacy_path_for(&toml),
            PathBuf::from("/home/user/.config/midikeys/config.json")
        );
    }
}
