//! Errors raised by work-log transitions.

use thiserror::Error;

/// Why a command was refused.
///
/// Every variant is terminal for the current invocation: the log is left
/// exactly as it was loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The command needs a running task and there is none.
    #[error(
        "for all I know, you aren't working on anything; see `ti -h` to know how to start working"
    )]
    NoTask,

    /// The command needs an idle sheet but a task is running.
    #[error("you are already working on {name}; stop it or use a different sheet")]
    AlreadyOn { name: String },

    /// `switch` was attempted while interrupted tasks are still suspended.
    #[error("you must be out of interruptions to do this ({depth} pending)")]
    InterruptsPending { depth: usize },

    /// A name, note, tag, or timestamp was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Externally supplied entries break the log invariants.
    #[error("invalid sheet state: {0}")]
    InvalidState(String),
}
