//! Command surface: exposes application-layer operations to front ends.
//!
//! All command functions live here and delegate to the shared [`AppState`].
//! A front end (tray app, GUI, IPC endpoint) is the intended consumer: it
//! builds the [`AppState`] from the same registry, command channel, and
//! enabled flag that `main` wires into the engine, then calls these
//! functions.  Nothing in the application layer imports this module.
//!
//! # `CommandResult<T>` wrapper
//!
//! Every command returns `CommandResult<T>` rather than `Result<T, E>` so
//! each response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! A front end can always check `result.success` without knowing the
//! per-command error type.
//!
//! # Persistence
//!
//! Commands that mutate the profile registry persist the config file after
//! the mutation succeeds, so edits survive a crash without an explicit
//! save.  [`save`] exists for callers that batch edits through the
//! registry directly.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use midikeys_core::{note_name, KeyAction};

use crate::application::manage_profiles::ProfileRegistry;
use crate::application::map_events::EngineCommand;
use crate::infrastructure::storage::config::save_config;

// ── Shared application state ──────────────────────────────────────────────────

/// State shared between the command surface and the engine wiring in
/// `main`.
///
/// The registry is the same `Arc<RwLock<…>>` the engine reads per event;
/// mutations made here are visible to the next event without restart.
pub struct AppState {
    /// All profiles plus the active-profile pointer.
    pub registry: Arc<RwLock<ProfileRegistry>>,
    /// Commands into the engine task (enable, disable, shutdown).
    pub command_tx: mpsc::Sender<EngineCommand>,
    /// Mirror of the engine's enabled state; written only by the engine.
    pub enabled: Arc<AtomicBool>,
    /// Identifier of the keyboard backend selected at startup.
    pub backend_name: &'static str,
    /// Where mutating commands persist the registry snapshot.
    pub config_path: PathBuf,
}

impl AppState {
    pub fn new(
        registry: Arc<RwLock<ProfileRegistry>>,
        command_tx: mpsc::Sender<EngineCommand>,
        enabled: Arc<AtomicBool>,
        backend_name: &'static str,
        config_path: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            command_tx,
            enabled,
            backend_name,
            config_path,
        })
    }
}

/// Unified response wrapper used by all commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Engine commands ───────────────────────────────────────────────────────────

/// Resumes mapping.  No-op if the engine is already enabled.
pub async fn enable(state: Arc<AppState>) -> CommandResult<()> {
    match state.command_tx.send(EngineCommand::Enable).await {
        Ok(()) => CommandResult::ok(()),
        Err(_) => CommandResult::err("engine is not running"),
    }
}

/// Suspends mapping and releases all held keys.
pub async fn disable(state: Arc<AppState>) -> CommandResult<()> {
    match state.command_tx.send(EngineCommand::Disable).await {
        Ok(()) => CommandResult::ok(()),
        Err(_) => CommandResult::err("engine is not running"),
    }
}

/// Whether the engine currently maps events.
///
/// Reads the engine-owned mirror flag; a just-sent enable/disable may not
/// be reflected until the engine task processes it.
pub async fn is_enabled(state: Arc<AppState>) -> CommandResult<bool> {
    CommandResult::ok(state.enabled.load(Ordering::Relaxed))
}

// ── Profile commands ──────────────────────────────────────────────────────────

/// Switches the active profile.  Takes effect on the next MIDI event.
pub async fn set_profile(state: Arc<AppState>, name: &str) -> CommandResult<()> {
    if let Err(e) = state.registry.write().await.set_active(name) {
        return CommandResult::err(e.to_string());
    }
    info!("active profile set to {name:?}");
    persist(&state).await
}

/// Name of the active profile.
pub async fn current_profile_name(state: Arc<AppState>) -> CommandResult<String> {
    let registry = state.registry.read().await;
    CommandResult::ok(registry.active_name().to_string())
}

/// Maps `note` to `action_spec` in the active profile.
pub async fn assign(state: Arc<AppState>, note: u8, action_spec: &str) -> CommandResult<()> {
    let action = match KeyAction::parse(action_spec) {
        Ok(action) => action,
        Err(e) => return CommandResult::err(format!("invalid key spec {action_spec:?}: {e}")),
    };
    {
        let mut registry = state.registry.write().await;
        let profile = registry.active_name().to_string();
        if let Err(e) = registry.assign(&profile, note, action) {
            return CommandResult::err(e.to_string());
        }
    }
    info!("note {note} ({}) now maps to {action}", note_name(note));
    persist(&state).await
}

/// Removes the mapping for `note` from the active profile, if any.
pub async fn unassign(state: Arc<AppState>, note: u8) -> CommandResult<()> {
    {
        let mut registry = state.registry.write().await;
        let profile = registry.active_name().to_string();
        if let Err(e) = registry.unassign(&profile, note) {
            return CommandResult::err(e.to_string());
        }
    }
    info!("note {note} ({}) unmapped", note_name(note));
    persist(&state).await
}

/// All profile names in sorted order.
pub async fn list_profiles(state: Arc<AppState>) -> CommandResult<Vec<String>> {
    let registry = state.registry.read().await;
    CommandResult::ok(registry.list())
}

/// Identifier of the keyboard backend selected at startup.
pub async fn list_backends(state: Arc<AppState>) -> CommandResult<String> {
    CommandResult::ok(state.backend_name.to_string())
}

/// Creates an empty profile.  Does not switch to it.
pub async fn create_profile(state: Arc<AppState>, name: &str) -> CommandResult<()> {
    if let Err(e) = state.registry.write().await.create(name, None) {
        return CommandResult::err(e.to_string());
    }
    info!("profile {name:?} created");
    persist(&state).await
}

/// Renames a profile, following the active pointer if needed.
pub async fn rename_profile(state: Arc<AppState>, old: &str, new: &str) -> CommandResult<()> {
    if let Err(e) = state.registry.write().await.rename(old, new) {
        return CommandResult::err(e.to_string());
    }
    info!("profile {old:?} renamed to {new:?}");
    persist(&state).await
}

/// Deletes a profile.  The last remaining profile cannot be deleted.
pub async fn delete_profile(state: Arc<AppState>, name: &str) -> CommandResult<()> {
    if let Err(e) = state.registry.write().await.delete(name) {
        return CommandResult::err(e.to_string());
    }
    info!("profile {name:?} deleted");
    persist(&state).await
}

/// Persists the current registry snapshot to the config file.
pub async fn save(state: Arc<AppState>) -> CommandResult<()> {
    persist(&state).await
}

async fn persist(state: &AppState) -> CommandResult<()> {
    let snapshot = state.registry.read().await.snapshot();
    if let Err(e) = save_config(&state.config_path, &snapshot) {
        warn!("config save failed: {e}");
        return CommandResult::err(format!("failed to save config: {e}"));
    }
    CommandResult::ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
