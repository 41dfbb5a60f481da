//! # tribune CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; tracing verbosity scales with repeated `-v`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tribune_cli::investigate::{run_investigate, InvestigateArgs};
use tribune_cli::payload::{run_payload, PayloadArgs};

/// Tribune Stack CLI
///
/// Runs TEE-attested AI investigations for milestone-escrow disputes and
/// prepares ledger submission payloads from their results.
#[derive(Parser, Debug)]
#[command(name = "tribune", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a full attested investigation for a dispute JSON file.
    Investigate(InvestigateArgs),

    /// Build the ledger submission payload from a stored result.
    Payload(PayloadArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Investigate(args) => run_investigate(&args).await,
        Commands::Payload(args) => run_payload(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
