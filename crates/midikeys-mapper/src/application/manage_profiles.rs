//! ManageProfilesUseCase: named mapping profiles and the active-profile pointer.
//!
//! The `ProfileRegistry` is the application's in-memory database of every
//! mapping profile the user has defined. Each entry holds a note→action map
//! and a velocity threshold; exactly one profile is active at any instant.
//!
//! # Registry invariants
//!
//! - The registry is never empty; `delete` refuses to remove the last
//!   remaining profile.
//! - `current` always names an existing entry. Deleting the active profile
//!   reassigns it deterministically: `"default"` if that profile still
//!   exists, otherwise the first remaining name in sorted order.
//!
//! # Sharing
//!
//! The registry lives behind `Arc<tokio::sync::RwLock<…>>`. The engine task
//! takes a read lock per event to resolve the active profile (no cached
//! copy), and the command surface mutates under the write lock, so an edit
//! is visible to the very next event without restarting the engine.
//!
//! # BTreeMap choice
//!
//! `BTreeMap<String, Profile>` keeps names in sorted order, which makes
//! `list()` output and the delete fallback deterministic without an extra
//! sort.

use std::collections::BTreeMap;

use midikeys_core::{KeyAction, MapperConfig, Profile, ProfileSchemaError};
use thiserror::Error;
use tracing::warn;

/// Error type for profile management operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile {0:?} does not exist")]
    NotFound(String),
    #[error("a profile named {0:?} already exists")]
    DuplicateName(String),
    #[error("profile name must not be empty")]
    EmptyName,
    #[error("the last remaining profile cannot be deleted")]
    CannotDeleteLastProfile,
}

/// In-memory registry of all mapping profiles plus the active-profile pointer.
pub struct ProfileRegistry {
    profiles: BTreeMap<String, Profile>,
    current: String,
}

impl ProfileRegistry {
    /// Creates a registry holding the built-in default profile (C major
    /// scale on the home row) with it active.
    pub fn new() -> Self {
        Self::with_profile(Profile::c_major_home_row("default"))
    }

    /// Creates a registry holding exactly the given profile, active.
    pub fn with_profile(profile: Profile) -> Self {
        let current = profile.name.clone();
        let mut profiles = BTreeMap::new();
        profiles.insert(current.clone(), profile);
        Self { profiles, current }
    }

    /// Builds a registry from the persisted configuration schema.
    ///
    /// An empty profile table is replaced by the built-in default; a
    /// `current_profile` that names no entry falls back like `delete` does.
    /// Malformed note numbers or key specs are hard errors, unlike in the
    /// lenient legacy importer.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileSchemaError`] when a note key or key spec in the
    /// config does not validate.
    pub fn from_config(config: &MapperConfig) -> Result<Self, ProfileSchemaError> {
        let mut profiles = BTreeMap::new();
        for (name, profile_config) in &config.profiles {
            if name.trim().is_empty() {
                warn!("skipping profile with empty name in config");
                continue;
            }
            profiles.insert(name.clone(), Profile::from_config(name, profile_config)?);
        }

        if profiles.is_empty() {
            warn!("config defines no profiles; using the built-in default");
            return Ok(Self::new());
        }

        let current = if profiles.contains_key(&config.current_profile) {
            config.current_profile.clone()
        } else {
            let fallback = Self::fallback_name(&profiles);
            warn!(
                "current profile {:?} not found in config; falling back to {:?}",
                config.current_profile, fallback
            );
            fallback
        };

        Ok(Self { profiles, current })
    }

    /// Returns the active profile.
    pub fn active(&self) -> &Profile {
        // Constructors and every mutation keep `current` pointing at an entry.
        self.profiles
            .get(&self.current)
            .expect("active profile must exist")
    }

    /// Returns the active profile's name.
    pub fn active_name(&self) -> &str {
        &self.current
    }

    /// Returns the named profile, if present.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Makes the named profile active.
    pub fn set_active(&mut self, name: &str) -> Result<(), ProfileError> {
        if !self.profiles.contains_key(name) {
            return Err(ProfileError::NotFound(name.to_string()));
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Creates a new profile.
    ///
    /// `base` seeds the new profile's map and threshold; without it the
    /// profile starts empty with threshold 0. The new profile does not
    /// become active.
    pub fn create(&mut self, name: &str, base: Option<Profile>) -> Result<(), ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.profiles.contains_key(name) {
            return Err(ProfileError::DuplicateName(name.to_string()));
        }
        let mut profile = base.unwrap_or_else(|| Profile::empty(name));
        profile.name = name.to_string();
        self.profiles.insert(name.to_string(), profile);
        Ok(())
    }

    /// Renames a profile, keeping the active pointer on it if it was active.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), ProfileError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !self.profiles.contains_key(old) {
            return Err(ProfileError::NotFound(old.to_string()));
        }
        if new == old {
            return Ok(());
        }
        if self.profiles.contains_key(new) {
            return Err(ProfileError::DuplicateName(new.to_string()));
        }
        if let Some(mut profile) = self.profiles.remove(old) {
            profile.name = new.to_string();
            self.profiles.insert(new.to_string(), profile);
        }
        if self.current == old {
            self.current = new.to_string();
        }
        Ok(())
    }

    /// Deletes a profile.
    ///
    /// Deleting the active profile moves the active pointer to the fallback;
    /// deleting the last remaining profile is refused.
    pub fn delete(&mut self, name: &str) -> Result<(), ProfileError> {
        if !self.profiles.contains_key(name) {
            return Err(ProfileError::NotFound(name.to_string()));
        }
        if self.profiles.len() == 1 {
            return Err(ProfileError::CannotDeleteLastProfile);
        }
        self.profiles.remove(name);
        if self.current == name {
            self.current = Self::fallback_name(&self.profiles);
        }
        Ok(())
    }

    /// Maps a note to an action in the named profile.
    pub fn assign(&mut self, profile: &str, note: u8, action: KeyAction) -> Result<(), ProfileError> {
        match self.profiles.get_mut(profile) {
            Some(p) => {
                p.midi_map.insert(note, action);
                Ok(())
            }
            None => Err(ProfileError::NotFound(profile.to_string())),
        }
    }

    /// Removes a note mapping from the named profile.
    ///
    /// Unassigning a note that was never mapped is a no-op.
    pub fn unassign(&mut self, profile: &str, note: u8) -> Result<(), ProfileError> {
        match self.profiles.get_mut(profile) {
            Some(p) => {
                p.midi_map.remove(&note);
                Ok(())
            }
            None => Err(ProfileError::NotFound(profile.to_string())),
        }
    }

    /// Sets the velocity threshold of the named profile.
    pub fn set_velocity_threshold(&mut self, profile: &str, value: u8) -> Result<(), ProfileError> {
        match self.profiles.get_mut(profile) {
            Some(p) => {
                p.velocity_threshold = value;
                Ok(())
            }
            None => Err(ProfileError::NotFound(profile.to_string())),
        }
    }

    /// Returns all profile names in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// Serializes the registry back into the configuration schema.
    pub fn snapshot(&self) -> MapperConfig {
        MapperConfig {
            profiles: self
                .profiles
                .iter()
                .map(|(name, profile)| (name.clone(), profile.to_config()))
                .collect(),
            current_profile: self.current.clone(),
        }
    }

    /// Replaces the registry contents from the configuration schema.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileSchemaError`] when the config does not validate; the
    /// registry is left unchanged in that case.
    pub fn restore(&mut self, config: &MapperConfig) -> Result<(), ProfileSchemaError> {
        *self = Self::from_config(config)?;
        Ok(())
    }

    /// Deterministic active-pointer fallback: "default" when present, else
    /// the first name in sorted order.
    fn fallback_name(profiles: &BTreeMap<String, Profile>) -> String {
        if profiles.contains_key("default") {
            return "default".to_string();
        }
        profiles
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "default".to_string())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
