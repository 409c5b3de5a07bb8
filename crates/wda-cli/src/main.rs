//! wda-lifecycle CLI
//!
//! Inspect WebDriverAgent endpoints and check whether a running agent would
//! be reused by a new session.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wda_lifecycle::commands::{self, ConfigOverrides};
use wda_lifecycle::output::print_success;

#[derive(Parser)]
#[command(name = "wda-lifecycle")]
#[command(author, version, about = "WebDriverAgent lifecycle inspector")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL the agent listens on
    Url,

    /// Query the running agent for its build metadata
    Status {
        /// Print the raw status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the running agent would be reused (dry run)
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show config file path
    Path,
    /// Write a config file from the command-line overrides
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Config {
            action: ConfigAction::Path,
        } => commands::config_path(cli.config.as_ref()),
        Commands::Config {
            action: ConfigAction::Init { force },
        } => {
            commands::config_init(cli.config.as_ref(), &cli.overrides, force)?;
        }
        command => {
            let config = commands::load_session_config(cli.config.as_ref(), &cli.overrides)?;
            match command {
                Commands::Url => commands::url_command(&config)?,
                Commands::Status { json } => commands::status_command(&config, json).await?,
                Commands::Check => {
                    commands::check_command(&config).await?;
                    if !cli.quiet {
                        print_success("Cache check complete");
                    }
                }
                Commands::Config { .. } => commands::config_show(&config)?,
            }
        }
    }

    Ok(())
}
