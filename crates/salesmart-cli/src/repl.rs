//! Interactive REPL for the assistant — the CLI counterpart of the
//! product's "Ask AI" chat screen.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! A failed request prints an inline error and the loop continues, the same
//! way the chat UI shows an error bubble without ending the session.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use salesmart_gateway::Assistant;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(assistant: &Assistant) -> Result<()> {
    helpers::print_banner();

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        // Empty prompts never reach the gateway
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(prompt = trimmed, "asking assistant");
        helpers::print_thinking();

        match assistant.ask(trimmed).await {
            Ok(reply) => {
                helpers::clear_thinking();
                helpers::print_response(&reply);
            }
            Err(e) => {
                helpers::clear_thinking();
                eprintln!("\n❌ Error: {e}\n");
            }
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = helpers::history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk, creating the directory if needed.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = helpers::history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = editor.save_history(&path);
}

fn is_exit_command(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_COMMANDS.contains(&lowered.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
