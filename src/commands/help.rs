//! `help`: interactive help mode.
//!
//! Writes an introductory block, then answers topic names until the user
//! types [`HELP_EXIT_KEYWORD`]. Every written line advances a checkpointed
//! cursor, so an interrupted block resumes at its first unwritten line.

use super::{read_if_absent, Command};
use crate::channel::LineChannel;
use crate::models::snapshot::{HelpProgress, Progress};
use crate::orchestrator::checkpoint_manager::Checkpointer;
use crate::{AppError, Result};

/// Keyword that leaves help mode.
pub const HELP_EXIT_KEYWORD: &str = "end";

const INTRO_LINE: &str = "Enter a command name to see its help";
const EXIT_LINE: &str = "Type end to leave help mode";
const UNKNOWN_TOPIC_LINE: &str = "No such command";

/// A command described by `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpTopic {
    names: Vec<String>,
    lines: Vec<String>,
}

impl HelpTopic {
    /// Topic for `command`, reachable by its name and aliases.
    #[must_use]
    pub fn for_command(command: &dyn Command) -> Self {
        let names = std::iter::once(command.name())
            .chain(command.aliases().iter().copied())
            .map(str::to_ascii_lowercase)
            .collect();
        Self {
            names,
            lines: vec![command.summary().to_owned(), EXIT_LINE.to_owned()],
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Interactive help over a fixed set of topics.
#[derive(Debug, Clone)]
pub struct Help {
    intro: Vec<String>,
    fallback: Vec<String>,
    topics: Vec<HelpTopic>,
}

impl Help {
    /// Build help mode for `topics`, listed in the given order.
    #[must_use]
    pub fn new(topics: Vec<HelpTopic>) -> Self {
        let listing = format!(
            "Available commands: {}",
            topics
                .iter()
                .filter_map(|t| t.names.first().map(String::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            intro: vec![INTRO_LINE.to_owned(), listing.clone(), EXIT_LINE.to_owned()],
            fallback: vec![UNKNOWN_TOPIC_LINE.to_owned(), listing, EXIT_LINE.to_owned()],
            topics,
        }
    }

    /// Lines of the introductory block.
    #[must_use]
    pub fn intro(&self) -> &[String] {
        &self.intro
    }

    /// Lines written for `topic`; the fallback block if it is unknown.
    #[must_use]
    pub fn block_for(&self, topic: &str) -> &[String] {
        let topic = topic.trim();
        self.topics
            .iter()
            .find(|t| t.matches(topic))
            .map_or(self.fallback.as_slice(), |t| t.lines.as_slice())
    }

    fn check_cursors(&self, progress: &HelpProgress) -> Result<()> {
        let topic_len = progress
            .topic
            .as_deref()
            .map_or(0, |topic| self.block_for(topic).len());
        if progress.intro_cursor > self.intro.len() || progress.topic_cursor > topic_len {
            return Err(AppError::Snapshot(format!(
                "help cursor out of range: intro {}/{}, topic {}/{topic_len}",
                progress.intro_cursor,
                self.intro.len(),
                progress.topic_cursor
            )));
        }
        Ok(())
    }
}

impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn summary(&self) -> &'static str {
        "Shows help for the available commands"
    }

    fn progress_kind(&self) -> &'static str {
        HelpProgress::KIND
    }

    fn execute(
        &self,
        checkpoint: &mut Checkpointer<'_>,
        channel: &mut dyn LineChannel,
    ) -> Result<()> {
        let mut progress: HelpProgress = checkpoint.snapshot().progress();
        self.check_cursors(&progress)?;

        for line in self.intro.iter().skip(progress.intro_cursor) {
            channel.write_line(line)?;
            progress.intro_cursor += 1;
            checkpoint.stage(&progress)?;
        }

        loop {
            let topic = read_if_absent(
                checkpoint,
                &mut progress,
                |p| &mut p.topic,
                || channel.read_line(),
            )?;
            if topic.trim() == HELP_EXIT_KEYWORD {
                return Ok(());
            }

            for line in self.block_for(&topic).iter().skip(progress.topic_cursor) {
                channel.write_line(line)?;
                progress.topic_cursor += 1;
                checkpoint.stage(&progress)?;
            }

            progress.topic = None;
            progress.topic_cursor = 0;
            checkpoint.stage(&progress)?;
        }
    }
}
