//! midikeys binary entry point.
//!
//! Wires together config loading, the keyboard backend probe, the MIDI
//! port, and the mapping engine task, then runs until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load config (TOML, or one-shot legacy JSON import)
//!  └─ ProfileRegistry::from_config()   -- shared Arc<RwLock<…>>
//!  └─ probe_backend()                  -- SendInput / xdotool / XTest / CG
//!  └─ MidirSource::open(port)          -- events into a bounded channel
//!  └─ MapEventsUseCase::run()          -- spawned engine task
//!       ├─ MIDI events   -> press/release through the backend
//!       └─ EngineCommand -> enable / disable / shutdown
//! ```
//!
//! The Ctrl-C handler sends `EngineCommand::Shutdown`; the engine releases
//! every held key before returning, so no key stays pressed after exit.

use std::sync::{atomic::AtomicBool, Arc};

use anyhow::Context;
use clap::Parser;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use midikeys_core::MapperConfig;
use midikeys_mapper::application::manage_profiles::ProfileRegistry;
use midikeys_mapper::application::map_events::{EngineCommand, EngineExit, MapEventsUseCase};
use midikeys_mapper::cli::{select_port, CliArgs};
use midikeys_mapper::infrastructure::{
    keyboard::probe_backend,
    midi_input::{midir::MidirSource, MidiSource},
    storage::{config, legacy},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    if args.list_backends {
        let backend = probe_backend().context("no keyboard backend available")?;
        println!("{}", backend.name());
        return Ok(());
    }

    let mut source = MidirSource::new("midikeys");

    if args.list_ports {
        let ports = source.list_ports().context("cannot enumerate MIDI ports")?;
        if ports.is_empty() {
            println!("no MIDI input ports found");
        } else {
            for (index, port) in ports.iter().enumerate() {
                println!("[{index}] {port}");
            }
        }
        return Ok(());
    }

    // ── Configuration ─────────────────────────────────────────────────────────
    let config_path = match args.config {
        Some(path) => path,
        None => config::default_config_path().context("cannot resolve config path")?,
    };

    let mapper_config = if config_path.exists() {
        config::load_config(&config_path)
            .with_context(|| format!("cannot load {}", config_path.display()))?
    } else if let Some(imported) = legacy::import_legacy(&legacy::legacy_path_for(&config_path)) {
        config::save_config(&config_path, &imported)
            .with_context(|| format!("cannot save imported config to {}", config_path.display()))?;
        info!("legacy JSON config imported to {}", config_path.display());
        imported
    } else {
        // First run: write the starter config so the user has a file to edit.
        let defaults = MapperConfig::default();
        match config::save_config(&config_path, &defaults) {
            Ok(()) => info!("created default config at {}", config_path.display()),
            Err(e) => warn!("cannot write default config: {e}"),
        }
        defaults
    };

    let mut registry = ProfileRegistry::from_config(&mapper_config)
        .map_err(config::ConfigError::Schema)
        .with_context(|| format!("config {} is not usable", config_path.display()))?;

    if let Some(profile) = &args.profile {
        registry
            .set_active(profile)
            .with_context(|| format!("profile {profile:?} not present in {}", config_path.display()))?;
    }
    info!(
        "active profile {:?} ({} mappings)",
        registry.active_name(),
        registry.active().midi_map.len()
    );

    // ── Keyboard backend ──────────────────────────────────────────────────────
    let backend = probe_backend().context("no usable keyboard backend on this platform")?;
    let backend_name = backend.name();

    // ── MIDI port ─────────────────────────────────────────────────────────────
    let ports = source.list_ports().context("cannot enumerate MIDI ports")?;
    let port = select_port(&ports, args.port.as_deref()).map_err(anyhow::Error::msg)?;
    let events = source
        .open(&port)
        .with_context(|| format!("cannot open MIDI port {port:?}"))?;

    // ── Engine task ───────────────────────────────────────────────────────────
    let registry = Arc::new(RwLock::new(registry));
    let enabled = Arc::new(AtomicBool::new(true));
    let (command_tx, command_rx) = mpsc::channel(16);

    let engine = MapEventsUseCase::new(Arc::clone(&registry), backend, Arc::clone(&enabled));
    let engine_task = tokio::spawn(engine.run(events, command_rx));

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let shutdown_tx = command_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(EngineCommand::Shutdown).await;
        }
    });

    info!("mapping {port:?} via the {backend_name} backend; press Ctrl-C to stop");

    match engine_task.await {
        Ok(EngineExit::Requested) => info!("mapper stopped"),
        Ok(EngineExit::SourceClosed) => warn!("MIDI source closed; mapper stopped"),
        Err(e) => warn!("engine task failed: {e}"),
    }

    source.close();
    Ok(())
}
