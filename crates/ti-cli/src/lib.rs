//! ti command-line library.
//!
//! Argument definitions, configuration and command rendering for the `ti`
//! binary.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
