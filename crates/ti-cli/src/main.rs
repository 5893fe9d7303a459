use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ti_cli::commands::{self, edit, util};
use ti_cli::{Cli, Commands, Config};
use ti_core::Command;
use ti_store::SheetStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let store = SheetStore::new(&config.sheet_path);

    let at = match cli.at.as_deref() {
        Some(raw) => util::parse_datetime(raw).context("invalid --at")?,
        None => Utc::now(),
    };

    let command = match command {
        Commands::On { name } => Command::On { name },
        Commands::Fin => Command::Fin,
        Commands::Switch { name } => Command::Switch { name },
        Commands::Interrupt { name } => Command::Interrupt { name },
        Commands::Status => Command::Status,
        Commands::Log { period } => Command::Log { period },
        Commands::Note { text } => Command::Note {
            text: text.join(" "),
        },
        Commands::Tag { tags } => Command::Tag { tags },
        Commands::Edit => {
            let env_editor = std::env::var("EDITOR").ok();
            return edit::run(
                &mut std::io::stdout().lock(),
                &store,
                &config,
                env_editor.as_deref(),
            );
        }
    };

    commands::run(&mut std::io::stdout().lock(), &store, command, at)
}
