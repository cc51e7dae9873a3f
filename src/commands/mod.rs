//! Resumable command state machines.
//!
//! Commands are stateless: everything they still need is held in their
//! [`Progress`] variant of the snapshot. Each required field is read only if
//! it is absent and is checkpointed the moment it is obtained, so a resumed
//! command skips straight past what it already has.

pub mod help;
pub mod median;
pub mod random;
pub mod sum;

pub use help::{Help, HelpTopic};
pub use median::{Median, MedianOf};
pub use random::RandomSequence;
pub use sum::Sum;

use crate::channel::LineChannel;
use crate::models::snapshot::Progress;
use crate::orchestrator::checkpoint_manager::Checkpointer;
use crate::{AppError, Result};

/// A command the interpreter can dispatch to.
pub trait Command {
    /// Canonical name.
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// One-line description shown by `help`.
    fn summary(&self) -> &'static str;

    /// `kind` tag of the progress variant this command saves.
    fn progress_kind(&self) -> &'static str;

    /// Run the command to completion, resuming from whatever progress the
    /// snapshot holds.
    ///
    /// Returns once the final output line is written. The caller resets the
    /// progress.
    ///
    /// # Errors
    ///
    /// Propagates channel, storage, and input errors; all are fatal for the
    /// session.
    fn execute(&self, checkpoint: &mut Checkpointer<'_>, channel: &mut dyn LineChannel)
        -> Result<()>;
}

/// Return the value held in `field`, or obtain it with `read` and checkpoint
/// it before returning.
pub(crate) fn read_if_absent<P, T>(
    checkpoint: &mut Checkpointer<'_>,
    progress: &mut P,
    field: impl Fn(&mut P) -> &mut Option<T>,
    read: impl FnOnce() -> Result<T>,
) -> Result<T>
where
    P: Progress,
    T: Clone,
{
    if let Some(value) = field(&mut *progress).clone() {
        return Ok(value);
    }

    let value = read()?;
    *field(&mut *progress) = Some(value.clone());
    checkpoint.stage(progress)?;
    Ok(value)
}

/// Read one line and parse it as a signed integer.
pub(crate) fn read_integer(channel: &mut dyn LineChannel) -> Result<i64> {
    let line = channel.read_line()?;
    let text = line.trim();
    text.parse::<i64>()
        .map_err(|err| AppError::Input(format!("expected an integer, got {text:?}: {err}")))
}

/// Read an element count in `0..=max_count`.
pub(crate) fn read_count(channel: &mut dyn LineChannel, max_count: u32) -> Result<u32> {
    let value = read_integer(channel)?;
    u32::try_from(value)
        .ok()
        .filter(|count| *count <= max_count)
        .ok_or_else(|| {
            AppError::Input(format!(
                "count must be between 0 and {max_count}, got {value}"
            ))
        })
}
