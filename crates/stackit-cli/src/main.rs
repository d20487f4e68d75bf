//! StackIt CLI - a small Q&A forum in your terminal.

use clap::Parser;
use stackit_cli::commands;
use stackit_cli::repl;
use stackit_cli::{Cli, Command, Config, Formatter, SessionIdentity, Shell};
use stackit_store::MemoryStore;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> stackit_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => load_default_config(),
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let page_size = cli.page_size.unwrap_or(config.settings.page_size).max(1);

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let identity = SessionIdentity::resolve(cli.user.as_deref(), &config.identity);
    let store = MemoryStore::new().with_seed_catalog();

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            let mut shell = Shell::new(store, identity, page_size);
            repl::run_repl(&mut shell, &formatter, config.settings.history_size)?;
        }
        Some(Command::List(args)) => {
            commands::execute_list(args, &store, page_size, &formatter)?;
        }
        Some(Command::Tags) => {
            commands::execute_tags(&formatter)?;
        }
    }

    Ok(())
}

fn load_default_config() -> Config {
    match Config::path() {
        Ok(path) if !path.exists() => {
            let config = Config::default();
            if let Err(e) = config.save_to(&path) {
                warn!(error = %e, "could not write default config");
            }
            config
        }
        _ => Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default config");
            Config::default()
        }),
    }
}
