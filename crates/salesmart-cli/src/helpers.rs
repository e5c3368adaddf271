//! Shared CLI helpers — response printing, banners, history path.

use std::path::PathBuf;

use colored::Colorize;

/// Print an assistant reply to stdout.
pub fn print_response(reply: &str) {
    println!();
    println!("{}", "💼 SaleSmart".cyan().bold());
    if reply.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{reply}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "💼 SaleSmart".cyan().bold(), version.dimmed());
    println!("{}", "Type a question, or \"exit\" to quit.".dimmed());
    println!();
}

/// Full-screen remediation message for a strict-mode configuration failure.
pub fn print_config_error(message: &str) {
    eprintln!();
    eprintln!("{}", "Configuration error".red().bold());
    eprintln!();
    eprintln!("  {message}");
    eprintln!();
    eprintln!(
        "{}",
        "Set the variables above (or drop --strict to use the built-in development endpoint)."
            .dimmed()
    );
    eprintln!();
}

/// Print a "thinking" placeholder while a request is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// REPL history file (`~/.salesmart/history/cli_history`).
pub fn history_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".salesmart").join("history").join("cli_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
