//! CLI subcommand implementations.
//!
//! Every sheet command goes through [`run`]: the command is executed against
//! the store and its [`Outcome`] is rendered to the given writer.

pub mod edit;
pub mod log;
pub mod util;

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use ti_core::{Command, Outcome, Store, execute, span};

/// Executes `command` at `at` and writes the human-readable result.
pub fn run<W, S>(writer: &mut W, store: &S, command: Command, at: DateTime<Utc>) -> Result<()>
where
    W: Write,
    S: Store,
{
    let outcome = execute(store, command, at)?;
    write_outcome(writer, &outcome)
}

/// Renders a command outcome.
pub fn write_outcome<W: Write>(writer: &mut W, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Started { name } => writeln!(writer, "Start working on {name}.")?,
        Outcome::Finished {
            ended,
            resumed,
            depth,
        } => {
            writeln!(writer, "So you stopped working on {ended}.")?;
            if let Some(resumed) = resumed {
                writeln!(writer, "Back to working on {resumed}.")?;
                write_depth(writer, *depth)?;
            }
        }
        Outcome::Switched { from, to } => {
            writeln!(writer, "So you stopped working on {from}.")?;
            writeln!(writer, "And started working on {to}.")?;
        }
        Outcome::Interrupted { name, depth } => {
            writeln!(writer, "Started working on {name}.")?;
            write_depth(writer, *depth)?;
        }
        Outcome::Status { name, elapsed, .. } => writeln!(
            writer,
            "You have been working on {name} for {}.",
            span::humanize_gap(*elapsed)
        )?,
        Outcome::Noted { name } => writeln!(writer, "Yep, noted to {name}.")?,
        Outcome::Tagged { count, .. } => writeln!(
            writer,
            "Okay, tagged current work with {count} tag{}.",
            if *count == 1 { "" } else { "s" }
        )?,
        Outcome::Report(report) => log::write_report(writer, report)?,
    }
    Ok(())
}

fn write_depth<W: Write>(writer: &mut W, depth: usize) -> Result<()> {
    if depth == 0 {
        writeln!(writer, "Congrats, you're out of interrupts!")?;
    } else {
        writeln!(writer, "You are now {depth} deep in interrupts.")?;
    }
    Ok(())
}
