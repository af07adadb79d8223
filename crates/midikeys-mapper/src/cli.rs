//! Command-line argument parsing for the mapper binary.
//!
//! Supports:
//! - Config file override
//! - Startup profile selection
//! - MIDI port selection by name, substring, or index
//! - Listing ports and the probed keyboard backend

use std::path::PathBuf;

use clap::Parser;

/// Map MIDI keyboard notes to computer keystrokes.
#[derive(Parser, Debug)]
#[command(
    name = "midikeys",
    version,
    about = "Map MIDI keyboard notes to computer keystrokes"
)]
pub struct CliArgs {
    /// Path to the configuration file (default: platform config dir)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to activate at startup (default: the saved current profile)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// MIDI input port, by exact name, index, or name fragment
    #[arg(short = 'p', long, value_name = "NAME|INDEX")]
    pub port: Option<String>,

    /// List available MIDI input ports and exit
    #[arg(short = 'l', long)]
    pub list_ports: bool,

    /// Print the keyboard backend selected for this platform and exit
    #[arg(long)]
    pub list_backends: bool,
}

/// Resolves the requested port against the available port list.
///
/// Matching order: exact name, then numeric index, then case-insensitive
/// substring.  Without a request the first available port wins, matching
/// what most single-device setups expect.
pub fn select_port(ports: &[String], requested: Option<&str>) -> Result<String, String> {
    if ports.is_empty() {
        return Err("no MIDI input ports available".to_string());
    }
    let Some(requested) = requested else {
        return Ok(ports[0].clone());
    };

    if let Some(exact) = ports.iter().find(|p| p.as_str() == requested) {
        return Ok(exact.clone());
    }

    if let Ok(index) = requested.parse::<usize>() {
        return ports
            .get(index)
            .cloned()
            .ok_or_else(|| format!("port index {index} out of range (0..{})", ports.len()));
    }

    let fragment = requested.to_lowercase();
    if let Some(partial) = ports.iter().find(|p| p.to_lowercase().contains(&fragment)) {
        return Ok(partial.clone());
    }

    Err(format!(
        "no MIDI port matches {requested:?} (available: {})",
        ports.join(", ")
    ))
}
