//! `median`: read a count N, then N integers, write their median.

use std::fmt::{Display, Formatter};

use super::{read_count, read_if_absent, read_integer, Command};
use crate::channel::LineChannel;
use crate::models::snapshot::{MedianProgress, Progress};
use crate::orchestrator::checkpoint_manager::Checkpointer;
use crate::Result;

/// Median of N integers.
#[derive(Debug, Clone, Copy)]
pub struct MedianOf {
    max_count: u32,
}

impl MedianOf {
    /// Create the command, accepting at most `max_count` values.
    #[must_use]
    pub fn new(max_count: u32) -> Self {
        Self { max_count }
    }
}

impl Command for MedianOf {
    fn name(&self) -> &'static str {
        "median"
    }

    fn summary(&self) -> &'static str {
        "Computes the median of a list of integers"
    }

    fn progress_kind(&self) -> &'static str {
        MedianProgress::KIND
    }

    fn execute(
        &self,
        checkpoint: &mut Checkpointer<'_>,
        channel: &mut dyn LineChannel,
    ) -> Result<()> {
        let mut progress: MedianProgress = checkpoint.snapshot().progress();

        let count = read_if_absent(
            checkpoint,
            &mut progress,
            |p| &mut p.count,
            || read_count(channel, self.max_count),
        )?;
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        progress
            .values
            .reserve_exact(count.saturating_sub(progress.values.len()));

        while progress.next_index < count {
            let value = read_integer(channel)?;
            progress.values.push(value);
            progress.next_index += 1;
            checkpoint.stage(&progress)?;
        }

        channel.write_line(&Median::of(&progress.values).to_string())
    }
}

/// Exact median, stored doubled so even-length halves stay integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Median {
    doubled: i128,
}

impl Median {
    /// Median of `values`; zero for an empty slice.
    #[must_use]
    pub fn of(values: &[i64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let mid = sorted.len() / 2;
        let doubled = match (sorted.len(), sorted.get(mid)) {
            (_, None) => 0,
            (len, Some(&upper)) if len % 2 == 1 => 2 * i128::from(upper),
            (_, Some(&upper)) => {
                let lower = sorted.get(mid - 1).copied().unwrap_or(upper);
                i128::from(lower) + i128::from(upper)
            }
        };
        Self { doubled }
    }

    /// Median as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.doubled as f64 / 2.0
    }
}

impl Display for Median {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.doubled / 2;
        if self.doubled % 2 == 0 {
            write!(f, "{whole}")
        } else if self.doubled < 0 {
            write!(f, "-{}.5", whole.unsigned_abs())
        } else {
            write!(f, "{whole}.5")
        }
    }
}
