//! `random-sequence`: write N values of the session's Lehmer generator.

use super::{read_count, read_if_absent, Command};
use crate::channel::LineChannel;
use crate::models::snapshot::{Progress, RandomProgress};
use crate::orchestrator::checkpoint_manager::Checkpointer;
use crate::Result;

/// Multiplier of the linear-congruential recurrence.
pub const LCG_MULTIPLIER: i64 = 16_807;
/// Modulus of the linear-congruential recurrence (2^31 - 1).
pub const LCG_MODULUS: i64 = 2_147_483_647;

/// Advance the generator one step: `x * 16807 mod (2^31 - 1)`.
#[must_use]
pub fn next_state(state: i64) -> i64 {
    state.rem_euclid(LCG_MODULUS) * LCG_MULTIPLIER % LCG_MODULUS
}

/// Pseudo-random sequence of N values.
#[derive(Debug, Clone, Copy)]
pub struct RandomSequence {
    max_count: u32,
}

impl RandomSequence {
    /// Create the command, emitting at most `max_count` values per call.
    #[must_use]
    pub fn new(max_count: u32) -> Self {
        Self { max_count }
    }
}

impl Command for RandomSequence {
    fn name(&self) -> &'static str {
        "random-sequence"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rand"]
    }

    fn summary(&self) -> &'static str {
        "Generates a sequence of pseudo-random numbers"
    }

    fn progress_kind(&self) -> &'static str {
        RandomProgress::KIND
    }

    fn execute(
        &self,
        checkpoint: &mut Checkpointer<'_>,
        channel: &mut dyn LineChannel,
    ) -> Result<()> {
        let mut progress: RandomProgress = checkpoint.snapshot().progress();

        let count = read_if_absent(
            checkpoint,
            &mut progress,
            |p| &mut p.count,
            || read_count(channel, self.max_count),
        )?;

        while progress.next_index < count {
            channel.write_line(&checkpoint.snapshot().rng_state.to_string())?;

            progress.next_index += 1;
            let staged = progress.clone().wrap();
            checkpoint.update(|snapshot| {
                snapshot.rng_state = next_state(snapshot.rng_state);
                snapshot.command = Some(staged);
            })?;
        }

        Ok(())
    }
}
