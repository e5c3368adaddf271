//! SaleSmart CLI — entry point.
//!
//! # Commands
//!
//! - `salesmart ask [-p PROMPT]` — ask the assistant (single-shot or REPL)
//! - `salesmart analyze FILE` — analyze a conversation transcript
//! - `salesmart status` — show the resolved (non-sensitive) configuration

mod analyze_cmd;
mod helpers;
mod repl;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use salesmart_core::config::ConfigPolicy;
use salesmart_core::error::GatewayError;
use salesmart_gateway::Assistant;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// SaleSmart — sales assistant and conversation analyzer
#[derive(Parser)]
#[command(name = "salesmart", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant (single-shot or interactive REPL)
    Ask {
        /// Single prompt (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        prompt: Option<String>,

        /// Require an externally configured auth token instead of the
        /// built-in development default
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Analyze a conversation transcript file ("speaker: utterance" lines)
    Analyze {
        /// Path to the transcript file
        file: PathBuf,

        /// Emit the communication record as JSON instead of a report
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Require an externally configured auth token
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration sources and the resolved snapshot
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            prompt,
            strict,
            logs,
        } => {
            init_logging(logs);
            let assistant = build_assistant(strict)?;
            match prompt {
                Some(prompt) => run_single_ask(&assistant, &prompt).await,
                None => repl::run(&assistant).await,
            }
        }
        Commands::Analyze {
            file,
            json,
            strict,
            logs,
        } => {
            init_logging(logs);
            let assistant = build_assistant(strict)?;
            analyze_cmd::run(&assistant, &file, json).await
        }
        Commands::Status => {
            init_logging(false);
            status::run()
        }
    }
}

/// Construct the assistant, turning a strict-mode configuration failure
/// into a full-screen remediation message.
fn build_assistant(strict: bool) -> Result<Assistant> {
    let policy = if strict {
        ConfigPolicy::Strict
    } else {
        ConfigPolicy::Permissive
    };

    match Assistant::from_env(policy) {
        Ok(assistant) => Ok(assistant),
        Err(GatewayError::ConfigMissing(msg)) => {
            helpers::print_config_error(&msg);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

/// One prompt, one reply, exit.
async fn run_single_ask(assistant: &Assistant, prompt: &str) -> Result<()> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        anyhow::bail!("prompt is empty");
    }

    let reply = assistant.ask(trimmed).await?;
    helpers::print_response(&reply);
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("salesmart=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
