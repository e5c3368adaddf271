//! `salesmart status` — show configuration sources and the resolved
//! snapshot. Presence only for the token; the value itself is never shown.

use anyhow::Result;
use colored::Colorize;

use salesmart_core::config::{
    self, resolver, ConfigPolicy, EnvSnapshot,
};

/// Run the status command.
pub fn run() -> Result<()> {
    let env = EnvSnapshot::capture();
    let config_path = config::get_config_file_path();
    let file = config::load_file_config(None);

    // Permissive resolution cannot fail
    let resolved = config::resolve_config(&env, &file, ConfigPolicy::Permissive)?;

    println!();
    println!("{}", "💼 SaleSmart Status".cyan().bold());
    println!();

    let config_exists = config_path.exists();
    println!(
        "  {:<16} {} {}",
        "Config file:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".dimmed().to_string()
        }
    );

    println!("  {:<16} {}", "Endpoint:".bold(), resolved.api_base);
    println!("  {:<16} {}", "Model:".bold(), resolved.model);
    println!(
        "  {:<16} {}",
        "Timeout:".bold(),
        format!("{}s", resolved.timeout_secs).dimmed()
    );

    // Same snapshot/file pair the resolution above used, so the report
    // cannot disagree with it.
    let token_configured = resolver::auth_token_configured(&env, &file);

    println!(
        "  {:<16} {}",
        "Auth token:".bold(),
        if token_configured {
            "configured ✓".green().to_string()
        } else {
            "built-in development default".yellow().to_string()
        }
    );

    println!();
    Ok(())
}
