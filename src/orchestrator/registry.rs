//! Case-insensitive command lookup.

use std::collections::HashMap;

use crate::commands::{Command, Help, HelpTopic, MedianOf, RandomSequence, Sum};
use crate::GlobalConfig;

/// Fixed mapping from command name (or alias) to command.
///
/// Built once per session; lookups never mutate it.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Standard command set: `sum`, `median`, `random-sequence`, `help`.
    #[must_use]
    pub fn new(max_count: u32) -> Self {
        let payload: Vec<Box<dyn Command>> = vec![
            Box::new(Sum),
            Box::new(MedianOf::new(max_count)),
            Box::new(RandomSequence::new(max_count)),
        ];
        let topics = payload
            .iter()
            .map(|command| HelpTopic::for_command(command.as_ref()))
            .collect();

        let mut registry = Self {
            commands: Vec::with_capacity(payload.len() + 1),
            index: HashMap::new(),
        };
        for command in payload {
            registry.register(command);
        }
        registry.register(Box::new(Help::new(topics)));
        registry
    }

    /// Standard command set with limits taken from `config`.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.max_count)
    }

    /// Find the command registered under `name`, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        let key = name.trim().to_ascii_lowercase();
        self.index
            .get(&key)
            .and_then(|&slot| self.commands.get(slot))
            .map(AsRef::as_ref)
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|command| command.name())
    }

    fn register(&mut self, command: Box<dyn Command>) {
        let slot = self.commands.len();
        for name in std::iter::once(command.name()).chain(command.aliases().iter().copied()) {
            self.index.insert(name.to_ascii_lowercase(), slot);
        }
        self.commands.push(command);
    }
}
