//! Command-line surface of the `stateful-calc` binary.
//!
//! The binary only installs tracing and wires stdin/stdout; everything it
//! decides (argument parsing, config precedence, slot selection, the
//! `status` and `reset` subcommands) lives here.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::channel::LineChannel;
use crate::config::StorageBackend;
use crate::orchestrator::Interpreter;
use crate::persistence::{envelope, DurableSlot, FileSlot, MemorySlot};
use crate::{AppError, GlobalConfig, Result};

/// Line printed by `status` when the slot is empty.
pub const NO_SAVED_STATE: &str = "no saved state";

/// Log output format, passed as `--log-format`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines. Default.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(
    name = "stateful-calc",
    about = "Crash-resumable command interpreter",
    version,
    long_about = None
)]
pub struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the state file location.
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Subcommand; `run` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Subcommands of the binary.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Subcommand)]
pub enum CliCommand {
    /// Run an interactive session, resuming saved state if present (default).
    Run,

    /// Print the saved snapshot as JSON.
    Status,

    /// Discard the saved snapshot.
    Reset,
}

impl Cli {
    /// Subcommand to execute.
    #[must_use]
    pub fn action(&self) -> CliCommand {
        self.command.unwrap_or(CliCommand::Run)
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence, lowest first: built-in defaults or the `--config` file,
    /// then `STATEFUL_CALC_STATE_PATH`, then `--state`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the config file cannot be loaded.
    pub fn resolve_config(&self) -> Result<GlobalConfig> {
        let mut config = match &self.config {
            Some(path) => GlobalConfig::load_from_path(path)?,
            None => GlobalConfig::default(),
        };
        config.apply_env_overrides();
        if let Some(state) = &self.state {
            config.state_path.clone_from(state);
        }
        Ok(config)
    }
}

/// Open the slot `action` operates on.
///
/// # Errors
///
/// Returns `AppError::Config` for `status` or `reset` with the memory
/// backend, which never has state from an earlier process.
pub fn open_slot(action: CliCommand, config: &GlobalConfig) -> Result<Box<dyn DurableSlot>> {
    match (config.storage, action) {
        (StorageBackend::File, _) => Ok(Box::new(FileSlot::new(config.state_path()))),
        (StorageBackend::Memory, CliCommand::Run) => Ok(Box::new(MemorySlot::new())),
        (StorageBackend::Memory, CliCommand::Status | CliCommand::Reset) => {
            Err(AppError::Config(format!(
                "{action:?} needs persistent state, but storage is \"memory\""
            )))
        }
    }
}

/// Run an interactive session. Exhausted input ends it successfully and
/// keeps the saved state for the next start.
///
/// # Errors
///
/// Propagates every interpreter error other than end of input.
pub fn run_session(
    interpreter: &Interpreter,
    channel: &mut dyn LineChannel,
    slot: &dyn DurableSlot,
) -> Result<()> {
    match interpreter.run(channel, slot) {
        Err(AppError::EndOfInput) => {
            info!("input closed, saved state kept for the next start");
            Ok(())
        }
        other => other,
    }
}

/// Write the saved snapshot as pretty JSON, or [`NO_SAVED_STATE`].
///
/// # Errors
///
/// Returns `AppError::Storage` or `AppError::Snapshot` if the slot cannot be
/// read or decoded, and `AppError::Io` if `out` fails.
pub fn render_status(slot: &dyn DurableSlot, out: &mut dyn Write) -> Result<()> {
    match envelope::decode(&slot.read()?)? {
        Some(snapshot) => {
            serde_json::to_writer_pretty(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
        None => writeln!(out, "{NO_SAVED_STATE}")?,
    }
    Ok(())
}

/// Replace the slot with an empty blob.
///
/// # Errors
///
/// Returns `AppError::Storage` if the replace fails.
pub fn reset(slot: &dyn DurableSlot) -> Result<()> {
    slot.write(&[])
}
