//! Launch options and logging setup.
//!
//! Options only affect presentation and seeding; rule constants live in
//! `blockfall-types`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::types::FRAME_MS;

#[derive(Parser, Debug, Clone)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// RNG seed for the piece sequence (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Hide the landing preview of the current piece
    #[arg(long)]
    pub no_ghost: bool,

    /// Disable line-clear particles and confetti
    #[arg(long)]
    pub no_effects: bool,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = FRAME_MS, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub frame_ms: u64,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `blockfall_core=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub show_ghost: bool,
    pub effects: bool,
    pub frame_ms: u64,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            seed: self.seed.unwrap_or_else(clock_seed),
            show_ghost: !self.no_ghost,
            effects: !self.no_effects,
            frame_ms: self.frame_ms,
            log_file: self.log_file,
            log_level: self.log_level,
        }
    }
}

impl Config {
    /// Parse the process arguments.
    pub fn from_args() -> Self {
        Args::parse().into_config()
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

/// Install the global `tracing` subscriber when a log file is configured.
///
/// The game owns the terminal in raw mode, so logs never go to stderr.
/// Returns whether a subscriber was installed.
pub fn init_logging(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log level `{}`", config.log_level))?;
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;
    Ok(true)
}
