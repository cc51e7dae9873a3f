//! State snapshot: root session fields plus the active command's progress.

use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// Seed the pseudo-random generator starts from in a fresh session.
pub const RNG_SEED: i64 = 420;

/// Complete persisted interpreter state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    /// Current value of the linear-congruential generator.
    pub rng_state: i64,
    /// Command line read but not yet fully handled.
    pub pending_input: Option<String>,
    /// Progress of the command currently executing, if any.
    pub command: Option<CommandProgress>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            rng_state: RNG_SEED,
            pending_input: None,
            command: None,
        }
    }
}

impl Snapshot {
    /// Progress of type `P` if it is the active variant, otherwise a fresh one.
    #[must_use]
    pub fn progress<P: Progress>(&self) -> P {
        self.command
            .as_ref()
            .and_then(P::peek)
            .cloned()
            .unwrap_or_default()
    }

    /// Short name of the active progress variant, for logging.
    #[must_use]
    pub fn command_kind(&self) -> &'static str {
        self.command.as_ref().map_or("idle", CommandProgress::kind)
    }

    /// Verify cursor bounds of the active progress variant.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Snapshot` if a cursor points past its sequence.
    pub fn check_invariants(&self) -> Result<()> {
        let violation = match &self.command {
            Some(CommandProgress::Median(p)) => {
                let bound = p
                    .count
                    .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
                (p.next_index != p.values.len() || p.values.len() > bound)
                    .then_some("median cursor out of range")
            }
            Some(CommandProgress::RandomSequence(p)) => (p.next_index > p.count.unwrap_or(0))
                .then_some("random-sequence cursor out of range"),
            Some(CommandProgress::Help(p)) => (p.topic.is_none() && p.topic_cursor != 0)
                .then_some("help topic cursor set without a topic"),
            Some(CommandProgress::Sum(_)) | None => None,
        };
        let violation = violation.or_else(|| {
            (self.command.is_some() && self.pending_input.is_none())
                .then_some("command progress saved without its input line")
        });

        match violation {
            Some(msg) => Err(AppError::Snapshot(msg.into())),
            None => Ok(()),
        }
    }
}

/// Per-command resumable progress. At most one is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandProgress {
    /// `sum` progress.
    Sum(SumProgress),
    /// `median` progress.
    Median(MedianProgress),
    /// `random-sequence` progress.
    RandomSequence(RandomProgress),
    /// `help` progress.
    Help(HelpProgress),
}

impl CommandProgress {
    /// Short variant name, the value of the `kind` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sum(_) => SumProgress::KIND,
            Self::Median(_) => MedianProgress::KIND,
            Self::RandomSequence(_) => RandomProgress::KIND,
            Self::Help(_) => HelpProgress::KIND,
        }
    }
}

/// Operands collected so far by `sum`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SumProgress {
    /// First operand.
    pub first: Option<i64>,
    /// Second operand.
    pub second: Option<i64>,
}

/// Values collected so far by `median`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedianProgress {
    /// Number of values requested.
    pub count: Option<u32>,
    /// Values read so far, in input order.
    pub values: Vec<i64>,
    /// Index of the next value to read.
    pub next_index: usize,
}

/// Emission state of `random-sequence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RandomProgress {
    /// Number of values requested.
    pub count: Option<u32>,
    /// Number of values already written.
    pub next_index: u32,
}

/// Display state of `help`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelpProgress {
    /// Sub-topic currently being displayed.
    pub topic: Option<String>,
    /// Introductory lines already written.
    pub intro_cursor: usize,
    /// Lines of the current topic block already written.
    pub topic_cursor: usize,
}

/// Typed access to one [`CommandProgress`] variant.
pub trait Progress: Clone + Default {
    /// Value of the `kind` tag for this variant.
    const KIND: &'static str;

    /// Borrow `self` out of `progress` if it is this variant.
    fn peek(progress: &CommandProgress) -> Option<&Self>;

    /// Wrap into the tagged union.
    fn wrap(self) -> CommandProgress;
}

macro_rules! impl_progress {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl Progress for $ty {
            const KIND: &'static str = $kind;

            fn peek(progress: &CommandProgress) -> Option<&Self> {
                match progress {
                    CommandProgress::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn wrap(self) -> CommandProgress {
                CommandProgress::$variant(self)
            }
        }
    };
}

impl_progress!(SumProgress, Sum, "sum");
impl_progress!(MedianProgress, Median, "median");
impl_progress!(RandomProgress, RandomSequence, "random_sequence");
impl_progress!(HelpProgress, Help, "help");
