//! Top-level interpreter loop.
//!
//! Reads a command line, checkpoints it as `pending_input`, dispatches it,
//! and clears it only once the command has finished. A session killed
//! mid-dispatch therefore re-enters the same command on restart instead of
//! reading a new line.

use tracing::{info, info_span, warn};

use super::checkpoint_manager::Checkpointer;
use super::registry::CommandRegistry;
use crate::channel::LineChannel;
use crate::commands::Command;
use crate::models::snapshot::{CommandProgress, Snapshot};
use crate::persistence::DurableSlot;
use crate::{AppError, GlobalConfig, Result};

/// Keyword that ends the session and clears the saved state.
pub const EXIT_KEYWORD: &str = "exit";

/// Message written for an unrecognised command.
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command, type help for the list of commands";

/// Resumable command interpreter.
pub struct Interpreter {
    registry: CommandRegistry,
}

impl Interpreter {
    /// Interpreter dispatching to `registry`.
    #[must_use]
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Interpreter with the standard command set configured from `config`.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(CommandRegistry::from_config(config))
    }

    /// Command registry used for dispatch.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run a session until `exit`, resuming from whatever `slot` holds.
    ///
    /// On `exit` the slot is replaced with an empty blob. Any error leaves
    /// the last checkpoint in place so a later call resumes from it.
    ///
    /// # Errors
    ///
    /// Returns the first channel, storage, snapshot, or input error; the
    /// session stops at that point.
    pub fn run(&self, channel: &mut dyn LineChannel, slot: &dyn DurableSlot) -> Result<()> {
        let mut checkpoint = Checkpointer::resume(slot)?;

        loop {
            let line = if let Some(line) = checkpoint.snapshot().pending_input.clone() {
                line
            } else {
                let line = channel.read_line()?;
                checkpoint.update(|snapshot| snapshot.pending_input = Some(line.clone()))?;
                line
            };

            let name = line.trim();
            if name.eq_ignore_ascii_case(EXIT_KEYWORD) {
                checkpoint.clear()?;
                info!(checkpoints = checkpoint.writes(), "session exited");
                return Ok(());
            }

            let command = self.registry.lookup(name);
            check_saved_progress(checkpoint.snapshot(), name, command)?;

            if let Some(command) = command {
                let _span = info_span!("command", name = command.name()).entered();
                command.execute(&mut checkpoint, channel)?;
            } else {
                warn!(input = name, "unknown command");
                channel.write_line(UNKNOWN_COMMAND_MESSAGE)?;
            }

            checkpoint.complete_command()?;
        }
    }
}

/// Saved progress must belong to the command the pending line resolves to.
fn check_saved_progress(
    snapshot: &Snapshot,
    name: &str,
    command: Option<&dyn Command>,
) -> Result<()> {
    let Some(saved) = snapshot.command.as_ref().map(CommandProgress::kind) else {
        return Ok(());
    };
    if command.map(Command::progress_kind) == Some(saved) {
        return Ok(());
    }
    Err(AppError::Snapshot(format!(
        "saved {saved} progress does not belong to pending input {name:?}"
    )))
}
