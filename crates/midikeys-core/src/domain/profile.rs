//! Mapping profiles and their on-disk schema.
//!
//! A [`Profile`] is the runtime form: note numbers resolved to parsed
//! [`KeyAction`]s, ready for per-event lookup.  [`MapperConfig`] /
//! [`ProfileConfig`] are the serde schema the storage layer persists:
//! note numbers become string keys (TOML and JSON tables require string
//! keys) and actions become canonical key-spec strings.  Conversion between
//! the two forms is checked, so a typo in a hand-edited config surfaces as
//! a typed error naming the offending entry instead of a silent misfire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keymap::{KeyAction, KeySpecError};

/// Error produced when converting the persisted schema into runtime form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileSchemaError {
    /// A `midi_map` key was not an integer in 0-127.
    #[error("invalid MIDI note number '{0}' (expected 0-127)")]
    InvalidNote(String),

    /// A `midi_map` value failed key-spec parsing.
    #[error("invalid key spec for note {note}: {source}")]
    InvalidKeySpec {
        note: u8,
        #[source]
        source: KeySpecError,
    },
}

// ── Runtime form ──────────────────────────────────────────────────────────────

/// A named note-to-action mapping table plus its velocity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Non-empty profile name; uniqueness is enforced by the registry.
    pub name: String,
    /// Note number (0-127) to parsed action.  Notes absent from the map are
    /// simply unmapped.
    pub midi_map: BTreeMap<u8, KeyAction>,
    /// Minimum note-on velocity that triggers a press; 0 disables the filter.
    pub velocity_threshold: u8,
}

impl Profile {
    /// Creates an empty profile with threshold 0.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            midi_map: BTreeMap::new(),
            velocity_threshold: 0,
        }
    }

    /// The built-in starter profile: the C-major scale from middle C mapped
    /// to the home row, the shape shipped with the very first release.
    pub fn c_major_home_row(name: impl Into<String>) -> Self {
        let scale = [
            (60, 'a'),
            (62, 's'),
            (64, 'd'),
            (65, 'f'),
            (67, 'g'),
            (69, 'h'),
            (71, 'j'),
            (72, 'k'),
        ];
        let midi_map = scale
            .into_iter()
            .map(|(note, c)| (note, KeyAction::bare(crate::keymap::Key::Char(c))))
            .collect();
        Self {
            name: name.into(),
            midi_map,
            velocity_threshold: 0,
        }
    }

    /// Looks up the action mapped to `note`, if any.
    pub fn action_for(&self, note: u8) -> Option<&KeyAction> {
        self.midi_map.get(&note)
    }

    /// Builds the runtime profile from its persisted form.
    ///
    /// # Errors
    ///
    /// [`ProfileSchemaError::InvalidNote`] for non-numeric or out-of-range
    /// note keys, [`ProfileSchemaError::InvalidKeySpec`] for unparsable
    /// action strings.
    pub fn from_config(name: impl Into<String>, config: &ProfileConfig) -> Result<Self, ProfileSchemaError> {
        let mut midi_map = BTreeMap::new();
        for (note_str, spec) in &config.midi_map {
            let note: u8 = note_str
                .trim()
                .parse()
                .ok()
                .filter(|n| *n <= 127)
                .ok_or_else(|| ProfileSchemaError::InvalidNote(note_str.clone()))?;
            let action = KeyAction::parse(spec)
                .map_err(|source| ProfileSchemaError::InvalidKeySpec { note, source })?;
            midi_map.insert(note, action);
        }
        Ok(Self {
            name: name.into(),
            midi_map,
            velocity_threshold: config.velocity_threshold,
        })
    }

    /// Serializes this profile back to its persisted form.  Actions are
    /// emitted in canonical spec format, so saving after a load normalizes
    /// hand-written specs.
    pub fn to_config(&self) -> ProfileConfig {
        ProfileConfig {
            midi_map: self
                .midi_map
                .iter()
                .map(|(note, action)| (note.to_string(), action.format()))
                .collect(),
            velocity_threshold: self.velocity_threshold,
        }
    }
}

// ── Persisted schema ──────────────────────────────────────────────────────────

/// Persisted form of one profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileConfig {
    /// Note number (as a string key) to key spec.
    #[serde(default)]
    pub midi_map: BTreeMap<String, String>,
    /// Minimum velocity; absent means 0 (no filtering).
    #[serde(default)]
    pub velocity_threshold: u8,
}

/// Top-level persisted document: all profiles plus the active profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapperConfig {
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, ProfileConfig>,
    #[serde(default = "default_current_profile")]
    pub current_profile: String,
}

fn default_current_profile() -> String {
    "default".to_string()
}

fn default_profiles() -> BTreeMap<String, ProfileConfig> {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        default_current_profile(),
        Profile::c_major_home_row("default").to_config(),
    );
    profiles
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            current_profile: default_current_profile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Key;

    #[test]
    fn test_default_config_carries_the_c_major_starter_profile() {
        // Arrange / Act
        let cfg = MapperConfig::default();

        // Assert
        assert_eq!(cfg.current_profile, "default");
        let profile = Profile::from_config("default", &cfg.profiles["default"]).unwrap();
        assert_eq!(profile.midi_map.len(), 8);
        assert_eq!(
            profile.action_for(60),
            Some(&KeyAction::bare(Key::Char('a')))
        );
        assert_eq!(
            profile.action_for(72),
            Some(&KeyAction::bare(Key::Char('k')))
        );
        assert_eq!(profile.velocity_threshold, 0);
    }

    #[test]
    fn test_profile_round_trips_through_config_form() {
        // Arrange
        let mut profile = Profile::empty("game");
        profile
            .midi_map
            .insert(48, KeyAction::parse("ctrl+shift+w").unwrap());
        profile.midi_map.insert(50, KeyAction::parse("space").unwrap());
        profile.velocity_threshold = 40;

        // Act
        let config = profile.to_config();
        let restored = Profile::from_config("game", &config).unwrap();

        // Assert
        assert_eq!(restored, profile);
        assert_eq!(config.midi_map["48"], "ctrl+shift+w");
    }

    #[test]
    fn test_from_config_rejects_out_of_range_note() {
        // Arrange
        let mut config = ProfileConfig {
            midi_map: BTreeMap::new(),
            velocity_threshold: 0,
        };
        config.midi_map.insert("128".to_string(), "a".to_string());

        // Act
        let err = Profile::from_config("bad", &config).unwrap_err();

        // Assert
        assert_eq!(err, ProfileSchemaError::InvalidNote("128".to_string()));
    }

    #[test]
    fn test_from_config_rejects_non_numeric_note() {
        let mut config = ProfileConfig {
            midi_map: BTreeMap::new(),
            velocity_threshold: 0,
        };
        config.midi_map.insert("C4".to_string(), "a".to_string());

        let err = Profile::from_config("bad", &config).unwrap_err();
        assert_eq!(err, ProfileSchemaError::InvalidNote("C4".to_string()));
    }

    #[test]
    fn test_from_config_reports_bad_key_spec_with_note_number() {
        // Arrange
        let mut config = ProfileConfig {
            midi_map: BTreeMap::new(),
            velocity_threshold: 0,
        };
        config.midi_map.insert("60".to_string(), "ctrl+".to_string());

        // Act
        let err = Profile::from_config("bad", &config).unwrap_err();

        // Assert
        match err {
            ProfileSchemaError::InvalidKeySpec { note, source } => {
                assert_eq!(note, 60);
                assert_eq!(source, KeySpecError::UnknownKeyToken(String::new()));
            }
            other => panic!("expected InvalidKeySpec, got {other:?}"),
        }
    }

    #[test]
    fn test_to_config_normalizes_spec_strings() {
        // Arrange: modifier order and case normalize on the way out.
        let mut config = ProfileConfig {
            midi_map: BTreeMap::new(),
            velocity_threshold: 0,
        };
        config
            .midi_map
            .insert("60".to_string(), "SHIFT+CTRL+A".to_string());

        // Act
        let profile = Profile::from_config("p", &config).unwrap();
        let out = profile.to_config();

        // Assert
        assert_eq!(out.midi_map["60"], "ctrl+shift+a");
    }
}
