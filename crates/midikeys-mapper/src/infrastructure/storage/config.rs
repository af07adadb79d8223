//! TOML-based configuration persistence.
//!
//! Reads and writes [`MapperConfig`] at the platform-appropriate location:
//! - Windows:  `%APPDATA%\midikeys\config.toml`
//! - Linux:    `~/.config/midikeys/config.toml` (honoring `XDG_CONFIG_HOME`)
//! - macOS:    `~/Library/Application Support/midikeys/config.toml`
//!
//! A missing file is not an error: first runs load the built-in default
//! config, which carries the C-major starter profile.  Serde defaults on
//! the schema types keep older files with absent fields working.

use std::path::{Path, PathBuf};

use midikeys_core::{MapperConfig, ProfileSchemaError};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The document parsed but its entries are not a valid mapper config.
    #[error("invalid config schema: {0}")]
    Schema(#[from] ProfileSchemaError),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Resolves the default config file path for this platform.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform
/// directory cannot be determined (e.g. `$HOME` unset).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(dir.join("config.toml"))
}

/// Loads a [`MapperConfig`] from `path`, returning `MapperConfig::default()`
/// if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<MapperConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: MapperConfig =
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MapperConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path` as pretty TOML.
///
/// Creates parent directories if they do not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &MapperConfig) -> Result<(), ConfigError> {
    // Ensure directory exists before writing.
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config directory including the `midikeys` subdir.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("midikeys"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("midikeys"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/midikeys
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("midikeys")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        // Fallback for unsupported platforms.
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use midikeys_core::Profile;

    /// Unique temp directory per test; pid plus a caller-chosen tag keeps
    /// parallel test runs from colliding.
    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("midikeys_test_{}_{tag}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        // Arrange
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        // Act
        let cfg = load_config(&path).expect("absent file must load defaults");

        // Assert
        assert_eq!(cfg, MapperConfig::default());
        assert!(cfg.profiles.contains_key("default"));
    }

    #[test]
    fn test_save_and_load_config_round_trip() {
        // Arrange
        let dir = temp_dir("round_trip");
        let path = dir.join("config.toml");

        let mut cfg = MapperConfig::default();
        cfg.current_profile = "piano".to_string();
        let mut profile = Profile::empty("piano");
        profile.midi_map.insert(
            61,
            midikeys_core::KeyAction::parse("ctrl+shift+b").unwrap(),
        );
        profile.velocity_threshold = 40;
        cfg.profiles.insert("piano".to_string(), profile.to_config());

        // Act
        save_config(&path, &cfg).expect("save");
        let loaded = load_config(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.profiles["piano"].velocity_threshold, 40);
        assert_eq!(loaded.profiles["piano"].midi_map["61"], "ctrl+shift+b");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_config_creates_parent_directories() {
        // Arrange
        let dir = temp_dir("parents");
        let path = dir.join("deeply").join("nested").join("config.toml");

        // Act
        save_config(&path, &MapperConfig::default()).expect("save");

        // Assert
        assert!(path.exists());

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_reports_parse_error_with_path() {
        // Arrange
        let dir = temp_dir("parse_error");
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_config(&path);

        // Assert
        match result {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Parse error, got {other:?}"),
        }

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_surfaces_io_error_for_unreadable_path() {
        // Arrange: reading a directory as a file is an I/O error, not NotFound
        let dir = temp_dir("io_error");

        // Act
        let result = load_config(&dir);

        // Assert
        assert!(matches!(result, Err(ConfigError::Io { .. })));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_config_path_ends_with_midikeys_config_toml() {
        // NoPlatformConfigDir is acceptable in a stripped CI environment.
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("midikeys/config.toml") || path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains("midikeys"));
        }
    }
}
