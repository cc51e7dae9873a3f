//! Shared test helpers for interpreter-level integration tests.
//!
//! Provides a scripted console that checks every read and write against an
//! expected transcript and can fail on chosen actions, plus a slot wrapper
//! that fails a chosen write. Individual test modules can focus on the
//! interaction being exercised rather than on plumbing.

use std::cell::Cell;
use std::collections::BTreeSet;

use stateful_calc::channel::LineChannel;
use stateful_calc::orchestrator::{CommandRegistry, Interpreter};
use stateful_calc::persistence::{DurableSlot, MemorySlot};
use stateful_calc::{AppError, Result};

/// Prefix of the message carried by induced channel failures.
pub const INDUCED: &str = "induced failure";

/// One expected console action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The interpreter reads this line.
    Read(String),
    /// The interpreter must write exactly this line.
    Write(String),
}

/// Expected read of `line`.
pub fn read(line: &str) -> Action {
    Action::Read(line.to_owned())
}

/// Expected write of `line`.
pub fn write(line: &str) -> Action {
    Action::Write(line.to_owned())
}

/// Console following a fixed script of reads and writes.
///
/// Actions are numbered from zero. Every index in the failure schedule makes
/// the next call at that index fail once, before the action happens.
#[derive(Debug)]
pub struct ScriptedConsole {
    script: Vec<Action>,
    position: usize,
    failures: BTreeSet<usize>,
    written: Vec<String>,
}

impl ScriptedConsole {
    /// Console expecting `script`, with no induced failures.
    pub fn new(script: Vec<Action>) -> Self {
        Self {
            script,
            position: 0,
            failures: BTreeSet::new(),
            written: Vec::new(),
        }
    }

    /// Fail once at each action index in `schedule`.
    pub fn with_failures(mut self, schedule: &[usize]) -> Self {
        self.failures.extend(schedule.iter().copied());
        self
    }

    /// Whether every scripted action has happened.
    pub fn at_end(&self) -> bool {
        self.position == self.script.len()
    }

    /// Index of the next action.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Lines written so far, across every session using this console.
    pub fn written(&self) -> &[String] {
        &self.written
    }

    fn induced_failure(&mut self) -> Result<()> {
        if self.failures.remove(&self.position) {
            return Err(AppError::Channel(format!(
                "{INDUCED} at action {}",
                self.position
            )));
        }
        Ok(())
    }
}

impl LineChannel for ScriptedConsole {
    fn read_line(&mut self) -> Result<String> {
        self.induced_failure()?;
        match self.script.get(self.position) {
            Some(Action::Read(line)) => {
                self.position += 1;
                Ok(line.clone())
            }
            Some(Action::Write(expected)) => panic!(
                "action {}: expected write of {expected:?}, but the interpreter read",
                self.position
            ),
            None => Err(AppError::EndOfInput),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.induced_failure()?;
        match self.script.get(self.position) {
            Some(Action::Write(expected)) => {
                assert_eq!(expected, line, "action {}: unexpected output", self.position);
                self.position += 1;
                self.written.push(line.to_owned());
                Ok(())
            }
            Some(Action::Read(_)) => panic!(
                "action {}: expected a read, but the interpreter wrote {line:?}",
                self.position
            ),
            None => panic!("script exhausted, but the interpreter wrote {line:?}"),
        }
    }
}

/// Slot that fails exactly one write, identified by its zero-based index.
///
/// The failed write leaves the previous contents in place.
pub struct FailingSlot {
    inner: MemorySlot,
    fail_on: Cell<Option<usize>>,
    writes: Cell<usize>,
}

impl FailingSlot {
    /// Wrap `inner`, failing its `index`-th write.
    pub fn new(inner: MemorySlot, index: usize) -> Self {
        Self {
            inner,
            fail_on: Cell::new(Some(index)),
            writes: Cell::new(0),
        }
    }
}

impl DurableSlot for FailingSlot {
    fn read(&self) -> Result<Vec<u8>> {
        self.inner.read()
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let index = self.writes.get();
        self.writes.set(index + 1);
        if self.fail_on.get() == Some(index) {
            self.fail_on.set(None);
            return Err(AppError::Storage(format!("induced storage failure on write {index}")));
        }
        self.inner.write(bytes)
    }
}

/// Interpreter with the standard command set and a small count limit.
pub fn interpreter() -> Interpreter {
    Interpreter::new(CommandRegistry::new(1_000))
}

/// Run `script` without interruptions against a fresh slot.
pub fn run_script(script: Vec<Action>) -> (ScriptedConsole, MemorySlot) {
    let slot = MemorySlot::new();
    let mut console = ScriptedConsole::new(script);
    interpreter()
        .run(&mut console, &slot)
        .expect("session completes");
    assert!(console.at_end(), "script not fully consumed at {}", console.position());
    (console, slot)
}

/// Run `script`, failing once at every index in `schedule`, restarting a
/// fresh interpreter against the same slot after each failure.
pub fn run_with_interruptions(script: Vec<Action>, schedule: &[usize]) -> (ScriptedConsole, MemorySlot) {
    let slot = MemorySlot::new();
    let mut console = ScriptedConsole::new(script).with_failures(schedule);

    for _ in schedule {
        let err = interpreter()
            .run(&mut console, &slot)
            .expect_err("session should stop at an induced failure");
        match err {
            AppError::Channel(msg) => assert!(msg.starts_with(INDUCED), "unexpected failure: {msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    interpreter()
        .run(&mut console, &slot)
        .expect("final session completes");
    assert!(console.at_end(), "script not fully consumed at {}", console.position());
    (console, slot)
}

/// Lines the script expects to be written, in order.
pub fn expected_output(script: &[Action]) -> Vec<String> {
    script
        .iter()
        .filter_map(|action| match action {
            Action::Write(line) => Some(line.clone()),
            Action::Read(_) => None,
        })
        .collect()
}

/// Help intro block.
pub fn help_intro() -> Vec<Action> {
    vec![
        write("Enter a command name to see its help"),
        write("Available commands: sum, median, random-sequence"),
        write("Type end to leave help mode"),
    ]
}

/// Help block for an unknown topic.
pub fn help_unknown() -> Vec<Action> {
    vec![
        write("No such command"),
        write("Available commands: sum, median, random-sequence"),
        write("Type end to leave help mode"),
    ]
}

/// Help block for a known topic described by `summary`.
pub fn help_topic(summary: &str) -> Vec<Action> {
    vec![write(summary), write("Type end to leave help mode")]
}
