//! Storage infrastructure: configuration persistence.
//!
//! A thin adapter between the application and the file system.  The
//! `config` sub-module reads and writes the TOML config file and resolves
//! the platform config directory; `legacy` performs the one-shot import of
//! the JSON format used by earlier releases.

pub mod config;
pub mod legacy;
