//! Vitae CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Run the HTTP gateway with the embedded chat page
//! - `chat`   — Talk to the assistant from the terminal
//! - `doctor` — Diagnose configuration, documents, and credentials

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "vitae",
    about = "Vitae — serve your professional profile as a conversational assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file (defaults to vitae.toml)
    #[arg(short, long, global = true, env = "VITAE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway and chat page
    Serve {
        /// Override the bind address
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Diagnose configuration, documents, and credentials
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(cli.config, host, port).await?,
        Commands::Chat { message } => commands::chat::run(cli.config, message).await?,
        Commands::Doctor => commands::doctor::run(cli.config).await?,
    }

    Ok(())
}
