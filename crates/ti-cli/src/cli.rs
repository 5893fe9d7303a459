//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A silly simple time tracker.
///
/// Start and stop work on named tasks, handle interruptions, attach notes and
/// tags, and see where the time went.
#[derive(Debug, Parser)]
#[command(name = "ti", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this time instead of now: RFC 3339, HH:MM (today), or "N minutes ago".
    #[arg(long, global = true, value_name = "TIME")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start working on a task.
    #[command(visible_alias = "o")]
    On {
        /// Name of the task.
        name: String,
    },

    /// Stop working on the current task, resuming an interrupted one if any.
    #[command(visible_alias = "f")]
    Fin,

    /// Stop the current task and start another one.
    Switch {
        /// Name of the new task.
        name: String,
    },

    /// Put the current task aside to handle an interruption.
    #[command(visible_alias = "i")]
    Interrupt {
        /// What the interruption is about.
        name: String,
    },

    /// Show the current task and for how long it has been running.
    #[command(visible_alias = "s")]
    Status,

    /// Show time spent per task.
    #[command(visible_alias = "l")]
    Log {
        /// Only count work that ended within the last N days.
        #[arg(short, long, value_name = "DAYS")]
        period: Option<u32>,
    },

    /// Add a note to the current task.
    #[command(visible_alias = "n")]
    Note {
        /// Note text; multiple words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Tag the current task.
    #[command(visible_alias = "t")]
    Tag {
        /// One or more tags.
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Edit the raw sheet in $EDITOR.
    #[command(visible_alias = "e")]
    Edit,
}
