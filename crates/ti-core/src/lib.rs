//! Core domain logic for the ti time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Work entries: single named intervals with notes and tags
//! - The work log: the running-task state machine and its interrupt stack
//! - Actions: command dispatch against an injected [`Store`]
//! - Reports: per-task aggregation and human-readable time spans

pub mod action;
mod entry;
mod error;
mod log;
pub mod report;
pub mod span;

pub use action::{Command, ExecuteError, Outcome, Store, apply, execute};
pub use entry::WorkEntry;
pub use error::ActionError;
pub use log::{Finished, INTERRUPT_PREFIX, WorkLog};
pub use report::{Report, ReportRow};
