//! The work log: chronological entries plus the interrupt stack.
//!
//! The log is either **idle** (no running entry) or **running** (the last
//! entry has no end). Every transition checks its preconditions before it
//! touches any entry, so a failed transition leaves the log unchanged.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::entry::WorkEntry;
use crate::error::ActionError;

/// Prefix given to the entry started by an interrupt.
pub const INTERRUPT_PREFIX: &str = "interrupt: ";

/// Result of [`WorkLog::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    /// Name of the entry that was stopped.
    pub ended: String,
    /// Name of the suspended task that was resumed, if any.
    pub resumed: Option<String>,
    /// Interrupt depth after the transition.
    pub depth: usize,
}

/// Ordered work entries and the stack of interrupted tasks.
///
/// Invariant: at most one entry is running, and only the last one may be.
/// Entries on the interrupt stack are always ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLog {
    entries: Vec<WorkEntry>,
    interrupt_stack: Vec<WorkEntry>,
}

impl WorkLog {
    /// Creates an empty, idle log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            interrupt_stack: Vec::new(),
        }
    }

    /// Builds a log from externally supplied parts, checking the invariants.
    pub fn from_parts(
        entries: Vec<WorkEntry>,
        interrupt_stack: Vec<WorkEntry>,
    ) -> Result<Self, ActionError> {
        let last = entries.len().saturating_sub(1);
        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(index, entry)| entry.is_running() && *index != last)
        {
            return Err(ActionError::InvalidState(format!(
                "entry {index} ({}) is running but is not the last entry",
                entry.name
            )));
        }

        if let Some(entry) = interrupt_stack.iter().find(|entry| entry.is_running()) {
            return Err(ActionError::InvalidState(format!(
                "interrupted entry {} has no end",
                entry.name
            )));
        }

        if let Some(entry) = entries
            .iter()
            .chain(&interrupt_stack)
            .find(|entry| entry.end.is_some_and(|end| end < entry.start))
        {
            return Err(ActionError::InvalidState(format!(
                "entry {} ends before it starts",
                entry.name
            )));
        }

        if let Some((earlier, later)) = entries
            .windows(2)
            .map(|pair| (&pair[0], &pair[1]))
            .find(|(earlier, later)| later.start < earlier.latest_instant())
        {
            return Err(ActionError::InvalidState(format!(
                "entry {} starts before the previous entry {} ends",
                later.name, earlier.name
            )));
        }

        Ok(Self {
            entries,
            interrupt_stack,
        })
    }

    /// Splits the log into its entries and interrupt stack.
    #[must_use]
    pub fn into_parts(self) -> (Vec<WorkEntry>, Vec<WorkEntry>) {
        (self.entries, self.interrupt_stack)
    }

    #[must_use]
    pub fn entries(&self) -> &[WorkEntry] {
        &self.entries
    }

    /// Suspended tasks, most recently interrupted last.
    #[must_use]
    pub fn interrupt_stack(&self) -> &[WorkEntry] {
        &self.interrupt_stack
    }

    /// Number of suspended tasks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.interrupt_stack.len()
    }

    /// The running entry: the last entry, and only if it has no end.
    #[must_use]
    pub fn current(&self) -> Option<&WorkEntry> {
        self.entries.last().filter(|entry| entry.is_running())
    }

    fn current_mut(&mut self) -> Option<&mut WorkEntry> {
        self.entries.last_mut().filter(|entry| entry.is_running())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.current().is_some()
    }

    /// Starts a new running entry. Requires an idle log.
    pub fn start_work(&mut self, name: &str, at: DateTime<Utc>) -> Result<(), ActionError> {
        self.require_idle()?;
        let name = validate_name(name)?;
        self.require_not_before_latest(at)?;

        tracing::debug!(name, %at, "starting work");
        self.entries.push(WorkEntry::start(name, at));
        Ok(())
    }

    /// Ends the running entry, returning its name. Requires a running log.
    pub fn end_work(&mut self, at: DateTime<Utc>) -> Result<String, ActionError> {
        self.require_running()?;
        self.require_not_before_latest(at)?;
        let current = self.current_mut().ok_or(ActionError::NoTask)?;

        tracing::debug!(name = %current.name, %at, "ending work");
        current.end(at);
        Ok(current.name.clone())
    }

    /// Ends the running entry and starts `name` at the same instant.
    ///
    /// Refused while any interrupt is pending, whether or not a task is running.
    pub fn switch_work(&mut self, name: &str, at: DateTime<Utc>) -> Result<String, ActionError> {
        if !self.interrupt_stack.is_empty() {
            return Err(ActionError::InterruptsPending {
                depth: self.depth(),
            });
        }
        self.require_running()?;
        let name = validate_name(name)?;
        self.require_not_before_latest(at)?;

        let previous = self.end_work(at)?;
        self.start_work(name, at)?;
        Ok(previous)
    }

    /// Suspends the running entry and starts an interrupt entry at the same instant.
    ///
    /// The ended entry stays in the log; a copy of it is pushed on the interrupt
    /// stack so [`WorkLog::finish`] can resume it. Returns the new depth.
    pub fn interrupt(&mut self, name: &str, at: DateTime<Utc>) -> Result<usize, ActionError> {
        self.require_running()?;
        let name = validate_name(name)?;
        self.require_not_before_latest(at)?;

        self.end_work(at)?;
        let suspended = self
            .entries
            .last()
            .cloned()
            .ok_or(ActionError::NoTask)?;
        self.interrupt_stack.push(suspended);
        self.start_work(&format!("{INTERRUPT_PREFIX}{name}"), at)?;

        tracing::debug!(depth = self.depth(), "interrupted");
        Ok(self.depth())
    }

    /// Pops the most recently suspended task and starts it again at `at`.
    ///
    /// Returns `Ok(None)` when nothing is suspended.
    pub fn resume_from_interrupt(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<Option<String>, ActionError> {
        let Some(top) = self.interrupt_stack.last() else {
            return Ok(None);
        };
        let name = top.name.clone();
        self.start_work(&name, at)?;
        self.interrupt_stack.pop();

        tracing::debug!(name = %name, depth = self.depth(), "resumed from interrupt");
        Ok(Some(name))
    }

    /// Ends the running entry and resumes the top of the interrupt stack, if any.
    pub fn finish(&mut self, at: DateTime<Utc>) -> Result<Finished, ActionError> {
        self.require_running()?;
        self.require_not_before_latest(at)?;

        let ended = self.end_work(at)?;
        let resumed = self.resume_from_interrupt(at)?;
        Ok(Finished {
            ended,
            resumed,
            depth: self.depth(),
        })
    }

    /// Appends a note to the running entry, returning the entry's name.
    pub fn add_note(&mut self, text: &str) -> Result<String, ActionError> {
        let current = self.current_mut().ok_or(ActionError::NoTask)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ActionError::InvalidInput("note cannot be empty".to_string()));
        }

        current.add_note(text);
        Ok(current.name.clone())
    }

    /// Tags the running entry, returning the entry's name and the number of distinct tags given.
    pub fn add_tags<I, S>(&mut self, tags: I) -> Result<(String, usize), ActionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let current = self.current_mut().ok_or(ActionError::NoTask)?;
        let mut given = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                return Err(ActionError::InvalidInput("tag cannot be empty".to_string()));
            }
            given.insert(tag.to_string());
        }
        if given.is_empty() {
            return Err(ActionError::InvalidInput(
                "at least one tag is required".to_string(),
            ));
        }

        let count = given.len();
        let added = current.add_tags(given);
        tracing::debug!(name = %current.name, count, added, "tagged entry");
        Ok((current.name.clone(), count))
    }

    fn require_idle(&self) -> Result<(), ActionError> {
        match self.current() {
            Some(current) => Err(ActionError::AlreadyOn {
                name: current.name.clone(),
            }),
            None => Ok(()),
        }
    }

    fn require_running(&self) -> Result<(), ActionError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(ActionError::NoTask)
        }
    }

    fn require_not_before_latest(&self, at: DateTime<Utc>) -> Result<(), ActionError> {
        match self.entries.last().map(WorkEntry::latest_instant) {
            Some(latest) if at < latest => Err(ActionError::InvalidInput(format!(
                "time {} is earlier than the last recorded time {}",
                at.to_rfc3339(),
                latest.to_rfc3339()
            ))),
            _ => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<&str, ActionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ActionError::InvalidInput(
            "task name cannot be empty".to_string(),
        ));
    }
    Ok(name)
}
