use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use glance::cli;

#[derive(Debug, Parser)]
#[command(name = "glance")]
#[command(about = "Build-server status at a glance for issue-tracker dashboards")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the status overview for the configured build server
    Status {
        /// Read the status payload from a JSON file instead of the network
        #[arg(long)]
        file: Option<PathBuf>,
        /// Override the configured build server address
        #[arg(long)]
        server: Option<String>,
    },
    /// Resolve trigger descriptions for a build JSON file
    Triggers {
        /// A build object or a bare array of trigger records
        file: PathBuf,
    },
    /// Check that the configured build server is reachable
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the fully resolved configuration
    Show,
    /// Write the default global config file
    Init,
}

fn main() -> Result<()> {
    let app = App::parse();
    match app.command {
        Commands::Status { file, server } => cli::run_status(file.as_deref(), server.as_deref()),
        Commands::Triggers { file } => cli::run_triggers(&file),
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init => cli::run_config_init(),
        },
    }
}
