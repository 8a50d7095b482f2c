use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pageflow_core::config::{LogLevel, LoggerConfig};
use pageflow_core::Settings;

mod commands;

#[derive(Parser)]
#[command(name = "pageflow")]
#[command(author, version, about = "Sectioned one-page presenter for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck file to present (shorthand for `run <deck>`)
    #[arg(short = 'd', long = "deck")]
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck in the terminal
    Run {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Alternative configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a deck and the configuration without starting the UI
    Check {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Alternative configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_override = match &cli.command {
        Some(Commands::Run { config, .. }) | Some(Commands::Check { config, .. }) => {
            config.clone()
        }
        _ => None,
    };
    let settings = match &config_override {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default_path()?,
    };

    init_logging(&settings.logger);

    if let Some(deck) = cli.deck {
        return commands::run::run(&deck, settings);
    }

    match cli.command {
        Some(Commands::Run { deck, .. }) => commands::run::run(&deck, settings),
        Some(Commands::Check { deck, .. }) => commands::check::run(&deck, &settings),
        Some(Commands::Init { force }) => commands::init::run(force),
        None => {
            // No deck, nothing to present
            eprintln!("No deck given. Try: pageflow run <deck.toml>");
            std::process::exit(2);
        }
    }
}

fn init_logging(logger: &LoggerConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_directive(logger)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Default filter directive derived from the logger settings; `RUST_LOG`
/// always wins over it.
fn log_directive(logger: &LoggerConfig) -> String {
    if !logger.enabled {
        return "warn".to_string();
    }

    let has = |level: LogLevel| logger.levels.contains(&level);
    if has(LogLevel::All) || has(LogLevel::Debug) {
        "debug".to_string()
    } else if has(LogLevel::Info) {
        "info".to_string()
    } else if has(LogLevel::Warn) {
        "warn".to_string()
    } else {
        "error".to_string()
    }
}
