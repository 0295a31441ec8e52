//! chalkmate CLI entry point.
//!
//! Commands:
//! - `discuss`: interactive classroom discussion or single-question mode
//! - `doctor`: diagnose configuration and backend health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chalkmate",
    about = "chalkmate — Simulated Peer-Tutoring Classroom",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a classroom discussion
    Discuss {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Seed the tie-break random source for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Diagnose configuration and backend health
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
        Commands::Discuss { message, seed } => commands::discuss::run(message, seed).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
