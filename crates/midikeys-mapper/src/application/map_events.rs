//! MapEventsUseCase: turns decoded MIDI events into keyboard actions.
//!
//! This use case is the heart of the mapper application. It receives
//! [`MidiEvent`]s from the MIDI source adapter, consults the active
//! [`Profile`] in the shared registry, and drives the injected
//! [`KeyboardBackend`] with press/release calls.
//!
//! # Architecture
//!
//! The use case depends only on the `KeyboardBackend` trait and the shared
//! [`ProfileRegistry`]. All infrastructure implementations (SendInput,
//! xdotool, XTest, CoreGraphics, mocks) are injected at construction time,
//! making the mapping logic fully unit-testable.
//!
//! # Held-key bookkeeping
//!
//! `held_keys` maps a MIDI note to the exact [`KeyAction`] that was pressed
//! for it. A note-off replays that remembered action rather than re-resolving
//! the profile, so swapping the active profile mid-hold still releases the
//! key that is physically down. Every successful press gets exactly one
//! matching release: on note-off, on disable, or on shutdown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use midikeys_core::{Key, KeyAction, MidiEvent, MidiEventKind};
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, trace, warn};

use crate::application::manage_profiles::ProfileRegistry;

/// Error type for keyboard backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("key {0:?} is not supported by this backend")]
    UnsupportedKey(Key),
    #[error("{tool} invocation failed: {detail}")]
    ToolFailed { tool: &'static str, detail: String },
    #[error("no usable keyboard backend on this platform")]
    NoBackendAvailable,
}

/// Platform-agnostic keyboard synthesis trait.
///
/// Each supported OS provides an implementation in the infrastructure layer.
/// Calls must be bounded-latency: a slow backend delays every subsequent
/// note, so implementations never wait on anything but the OS input call
/// itself.
pub trait KeyboardBackend: Send + Sync {
    /// Presses the action's modifiers (in ctrl, alt, shift order) and then
    /// its base key, leaving all of them held down.
    fn press(&self, action: &KeyAction) -> Result<(), BackendError>;

    /// Releases the action's base key and then its modifiers in reverse
    /// press order.
    fn release(&self, action: &KeyAction) -> Result<(), BackendError>;

    /// Taps the action: press, optionally hold, release.
    ///
    /// Backends with a native combined press+release (e.g. `xdotool key`)
    /// override this with a single call when `hold` is `None`.
    fn press_and_release(
        &self,
        action: &KeyAction,
        hold: Option<Duration>,
    ) -> Result<(), BackendError> {
        self.press(action)?;
        if let Some(duration) = hold {
            std::thread::sleep(duration);
        }
        self.release(action)
    }

    /// Stable identifier for this backend ("sendinput", "xdotool", ...).
    fn name(&self) -> &'static str;
}

/// Control messages delivered to the engine task from the command surface.
///
/// `held_keys` and the enabled flag are mutated only by the engine task;
/// other tasks influence them exclusively through these messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Resume translating note events into key presses.
    Enable,
    /// Stop translating and release every held key.
    Disable,
    /// Drain held keys and exit the run loop.
    Shutdown,
}

/// Why the engine's run loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineExit {
    /// The MIDI event channel closed (port disconnected or source dropped).
    SourceClosed,
    /// A `Shutdown` command was received, or the command channel closed.
    Requested,
}

/// The Map Events use case.
///
/// Owns the enabled flag and the held-key table; consumes MIDI events and
/// engine commands strictly in delivery order on a single task.
pub struct MapEventsUseCase {
    registry: Arc<RwLock<ProfileRegistry>>,
    backend: Arc<dyn KeyboardBackend>,
    held_keys: HashMap<u8, KeyAction>,
    enabled: bool,
    /// Read mirror of `enabled` for `is_enabled` queries from other tasks.
    /// Written only by this use case.
    enabled_flag: Arc<AtomicBool>,
}

impl MapEventsUseCase {
    /// Creates a new use case instance. The engine starts enabled.
    pub fn new(
        registry: Arc<RwLock<ProfileRegistry>>,
        backend: Arc<dyn KeyboardBackend>,
        enabled_flag: Arc<AtomicBool>,
    ) -> Self {
        enabled_flag.store(true, Ordering::Relaxed);
        Self {
            registry,
            backend,
            held_keys: HashMap::new(),
            enabled: true,
            enabled_flag,
        }
    }

    /// Returns whether mapping is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the number of keys currently held down.
    pub fn held_count(&self) -> usize {
        self.held_keys.len()
    }

    /// Enables or disables mapping.
    ///
    /// Disabling releases every held key before clearing the table, so no
    /// key stays stuck while the engine is off.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.enabled_flag.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.release_held_keys();
        }
        info!("mapping {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Handles one MIDI event.
    ///
    /// Backend errors are logged and never abort event handling; the engine
    /// favors availability over strict correctness.
    pub async fn handle_event(&mut self, event: &MidiEvent) {
        match event.kind {
            MidiEventKind::NoteOn => self.handle_note_on(event).await,
            MidiEventKind::NoteOff => self.handle_note_off(event),
            MidiEventKind::Other => {
                trace!("ignoring non-note event");
            }
        }
    }

    /// Runs the engine until the MIDI source closes or shutdown is requested.
    ///
    /// Events and commands are consumed via `select!` on a single task, so
    /// no two events are ever handled concurrently and delivery order is
    /// preserved. Both exit paths drain `held_keys`, guaranteeing no key
    /// remains pressed after the loop returns.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<MidiEvent>,
        mut commands: mpsc::Receiver<EngineCommand>,
    ) -> EngineExit {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(EngineCommand::Enable) => self.set_enabled(true),
                    Some(EngineCommand::Disable) => self.set_enabled(false),
                    Some(EngineCommand::Shutdown) | None => {
                        debug!("shutdown requested; draining held keys");
                        self.stop();
                        return EngineExit::Requested;
                    }
                },
                event = events.recv() => match event {
                    Some(event) => self.handle_event(&event).await,
                    None => {
                        warn!("MIDI source closed; draining held keys");
                        self.stop();
                        return EngineExit::SourceClosed;
                    }
                },
            }
        }
    }

    // ── Private event handlers ────────────────────────────────────────────────

    async fn handle_note_on(&mut self, event: &MidiEvent) {
        if !self.enabled {
            return;
        }

        // Resolve the action under a short read lock; the lock is released
        // before any backend call.
        let action = {
            let registry = self.registry.read().await;
            let profile = registry.active();
            if event.velocity < profile.velocity_threshold {
                trace!(
                    "note {} velocity {} below threshold {}",
                    event.note,
                    event.velocity,
                    profile.velocity_threshold
                );
                return;
            }
            profile.action_for(event.note).copied()
        };

        let Some(action) = action else {
            trace!("note {} is unmapped", event.note);
            return;
        };

        // Duplicate note-on while held is ignored to avoid re-trigger chatter.
        if self.held_keys.contains_key(&event.note) {
            return;
        }

        match self.backend.press(&action) {
            Ok(()) => {
                debug!("note {} down -> press {}", event.note, action);
                self.held_keys.insert(event.note, action);
            }
            Err(e) => {
                warn!("press {} for note {} failed: {e}", action, event.note);
            }
        }
    }

    fn handle_note_off(&mut self, event: &MidiEvent) {
        // Release replays the remembered action; the current profile map is
        // never consulted here. A note that was never pressed (unmapped, or
        // pressed before the engine was enabled) is a silent no-op.
        let Some(action) = self.held_keys.remove(&event.note) else {
            return;
        };
        debug!("note {} up -> release {}", event.note, action);
        if let Err(e) = self.backend.release(&action) {
            // The entry is already removed: retrying a failing release
            // forever would stall the engine. A stuck physical key is
            // degraded but non-fatal.
            warn!("release {} for note {} failed: {e}", action, event.note);
        }
    }

    fn release_held_keys(&mut self) {
        for (note, action) in self.held_keys.drain() {
            if let Err(e) = self.backend.release(&action) {
                warn!("release {action} for note {note} failed during drain: {e}");
            }
        }
    }

    fn stop(&mut self) {
        self.enabled = false;
        self.enabled_flag.store(false, Ordering::Relaxed);
        self.release_held_keys();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
