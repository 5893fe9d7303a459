//! Command dispatch over a [`WorkLog`].
//!
//! [`apply`] maps one [`Command`] onto its precondition and mutation and
//! returns an [`Outcome`] describing what happened. [`execute`] wraps it in
//! the per-invocation cycle: load the log from a [`Store`], apply the
//! command, and persist the result when the command mutates the log.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::error::ActionError;
use crate::log::WorkLog;
use crate::report::Report;

/// Persistence boundary for the work log.
///
/// The whole log is loaded and dumped as one document.
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self) -> Result<WorkLog, Self::Error>;

    fn dump(&self, log: &WorkLog) -> Result<(), Self::Error>;
}

/// A user command against the work log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start working on a task.
    On { name: String },
    /// Stop the current task, resuming an interrupted one if any.
    Fin,
    /// Stop the current task and start another.
    Switch { name: String },
    /// Suspend the current task for an unplanned one.
    Interrupt { name: String },
    /// Report the current task and how long it has been running.
    Status,
    /// Attach a note to the current task.
    Note { text: String },
    /// Attach tags to the current task.
    Tag { tags: Vec<String> },
    /// Aggregate time per task, optionally over the last `period` days.
    Log { period: Option<u32> },
}

impl Command {
    /// Whether the command leaves the log untouched.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Status | Self::Log { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::On { .. } => "on",
            Self::Fin => "fin",
            Self::Switch { .. } => "switch",
            Self::Interrupt { .. } => "interrupt",
            Self::Status => "status",
            Self::Note { .. } => "note",
            Self::Tag { .. } => "tag",
            Self::Log { .. } => "log",
        }
    }
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started {
        name: String,
    },
    Finished {
        ended: String,
        resumed: Option<String>,
        /// Interrupt depth after the command.
        depth: usize,
    },
    Switched {
        from: String,
        to: String,
    },
    Interrupted {
        /// Name of the running interrupt entry.
        name: String,
        /// Interrupt depth after the command.
        depth: usize,
    },
    Status {
        name: String,
        since: DateTime<Utc>,
        elapsed: Duration,
    },
    Noted {
        name: String,
    },
    Tagged {
        name: String,
        count: usize,
    },
    Report(Report),
}

/// Failure of [`execute`]: either the command was refused or the store failed.
#[derive(Debug, Error)]
pub enum ExecuteError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("sheet storage failed: {0}")]
    Store(#[source] E),
}

/// Applies `command` to `log` at instant `at`.
///
/// On error the log is unchanged.
pub fn apply(
    log: &mut WorkLog,
    command: Command,
    at: DateTime<Utc>,
) -> Result<Outcome, ActionError> {
    match command {
        Command::On { name } => {
            log.start_work(&name, at)?;
            Ok(Outcome::Started {
                name: current_name(log)?,
            })
        }
        Command::Fin => {
            let finished = log.finish(at)?;
            Ok(Outcome::Finished {
                ended: finished.ended,
                resumed: finished.resumed,
                depth: finished.depth,
            })
        }
        Command::Switch { name } => {
            let from = log.switch_work(&name, at)?;
            Ok(Outcome::Switched {
                from,
                to: current_name(log)?,
            })
        }
        Command::Interrupt { name } => {
            let depth = log.interrupt(&name, at)?;
            Ok(Outcome::Interrupted {
                name: current_name(log)?,
                depth,
            })
        }
        Command::Status => {
            let current = log.current().ok_or(ActionError::NoTask)?;
            Ok(Outcome::Status {
                name: current.name.clone(),
                since: current.start,
                elapsed: current.duration_at(at),
            })
        }
        Command::Note { text } => {
            let name = log.add_note(&text)?;
            Ok(Outcome::Noted { name })
        }
        Command::Tag { tags } => {
            let (name, count) = log.add_tags(&tags)?;
            Ok(Outcome::Tagged { name, count })
        }
        Command::Log { period } => Ok(Outcome::Report(Report::build(log, period, at))),
    }
}

/// Loads the log, applies `command`, and persists the log if it changed.
///
/// Nothing is persisted for read-only commands or when the command is refused.
pub fn execute<S: Store>(
    store: &S,
    command: Command,
    at: DateTime<Utc>,
) -> Result<Outcome, ExecuteError<S::Error>> {
    let mut log = store.load().map_err(ExecuteError::Store)?;
    let label = command.label();
    let read_only = command.is_read_only();

    let outcome = apply(&mut log, command, at).inspect_err(|err| {
        tracing::debug!(command = label, error = %err, "command refused");
    })?;

    if !read_only {
        store.dump(&log).map_err(ExecuteError::Store)?;
        tracing::info!(command = label, entries = log.entries().len(), "sheet updated");
    }

    Ok(outcome)
}

fn current_name(log: &WorkLog) -> Result<String, ActionError> {
    log.current()
        .map(|entry| entry.name.clone())
        .ok_or(ActionError::NoTask)
}
