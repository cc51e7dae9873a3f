//! `sum`: read two integers, write their sum.

use super::{read_if_absent, read_integer, Command};
use crate::channel::LineChannel;
use crate::models::snapshot::{Progress, SumProgress};
use crate::orchestrator::checkpoint_manager::Checkpointer;
use crate::{AppError, Result};

/// Sum of two operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Command for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["add"]
    }

    fn summary(&self) -> &'static str {
        "Adds two integers"
    }

    fn progress_kind(&self) -> &'static str {
        SumProgress::KIND
    }

    fn execute(
        &self,
        checkpoint: &mut Checkpointer<'_>,
        channel: &mut dyn LineChannel,
    ) -> Result<()> {
        let mut progress: SumProgress = checkpoint.snapshot().progress();

        let first = read_if_absent(
            checkpoint,
            &mut progress,
            |p| &mut p.first,
            || read_integer(channel),
        )?;
        let second = read_if_absent(
            checkpoint,
            &mut progress,
            |p| &mut p.second,
            || read_integer(channel),
        )?;

        let total = first
            .checked_add(second)
            .ok_or_else(|| AppError::Input(format!("{first} + {second} overflows")))?;
        channel.write_line(&total.to_string())
    }
}
