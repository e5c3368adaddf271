//! `salesmart analyze` — run transcript analysis and emit a communication
//! record, the CLI counterpart of the recording-finish flow in the app.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use salesmart_core::types::AnalysisResult;
use salesmart_gateway::Assistant;

/// The record built from a completed analysis, as the app would store it
/// against the customer's communication history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationRecord {
    pub analyzed_at: DateTime<Utc>,
    /// Transcript length in characters, for quick triage in lists.
    pub transcript_chars: usize,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Run the analyze command.
pub async fn run(assistant: &Assistant, file: &Path, as_json: bool) -> Result<()> {
    let transcript = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read transcript {}", file.display()))?;

    // Caller precondition: at least one exchange
    if transcript.trim().is_empty() {
        anyhow::bail!("transcript {} is empty", file.display());
    }

    let result = assistant
        .analyze_conversation(&transcript)
        .await
        .context("analysis unavailable")?;

    let record = CommunicationRecord {
        analyzed_at: Utc::now(),
        transcript_chars: transcript.chars().count(),
        result,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_report(&record);
    }

    Ok(())
}

fn print_report(record: &CommunicationRecord) {
    let result = &record.result;

    println!();
    println!("{}", "💼 Conversation Analysis".cyan().bold());
    println!();
    println!("  {}", "Summary".bold());
    println!("  {}", result.summary);
    println!();

    if result.signals.is_empty() {
        println!("  {} {}", "Signals:".bold(), "(none)".dimmed());
    } else {
        println!("  {}", "Signals".bold());
        for signal in &result.signals {
            println!("    • {signal}");
        }
    }

    println!();
    println!(
        "  {:<16} {}",
        "Ability score:".bold(),
        score_colored(result.ability_score)
    );
    println!(
        "  {:<16} {}",
        "Task score:".bold(),
        score_colored(result.task_score)
    );
    println!();
    println!("  {:<16} {}", "Next step:".bold(), result.next_step);
    println!();
}

/// Color a 0-100 score green/yellow/red.
fn score_colored(score: f64) -> String {
    let rendered = format!("{score:.0} / 100");
    if score >= 80.0 {
        rendered.green().to_string()
    } else if score >= 60.0 {
        rendered.yellow().to_string()
    } else {
        rendered.red().to_string()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
