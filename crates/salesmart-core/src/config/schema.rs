//! Configuration schema — the resolved [`GatewayConfig`] and the optional
//! on-disk [`FileConfig`] layer.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ─────────────────────────────────────────────
// Built-in defaults (permissive-mode fallbacks)
// ─────────────────────────────────────────────

/// Default API base, pointing at a local OpenAI-compatible gateway.
pub const DEFAULT_API_BASE: &str = "http://localhost:11434/v1";

/// Development token accepted by the internal gateway. Strict mode refuses
/// to fall back to this and demands an externally issued key instead.
pub const DEFAULT_AUTH_TOKEN: &str = "salesmart-internal-dev";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen3-max";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────
// GatewayConfig
// ─────────────────────────────────────────────

/// Fully resolved gateway configuration.
///
/// Built once per client by [`crate::config::resolve_config`] and immutable
/// afterwards; safe to share across concurrent calls. `api_base` and
/// `auth_token` are guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API base URL; `/chat/completions` is appended per request.
    pub api_base: String,
    /// Bearer token for authentication. Never logged.
    pub auth_token: String,
    /// Model identifier sent in each request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

// ─────────────────────────────────────────────
// FileConfig (~/.salesmart/config.json)
// ─────────────────────────────────────────────

/// Optional on-disk configuration layer. Every field is optional; absent
/// fields fall through to the next resolution layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub auth_token: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Default config file path (`~/.salesmart/config.json`).
pub fn get_config_file_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".salesmart").join("config.json")
}

/// Load the file layer from the default path (or an explicit one).
///
/// A missing or unparsable file degrades to an empty layer; configuration
/// must still resolve from env vars and defaults.
pub fn load_file_config(path: Option<&Path>) -> FileConfig {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_file_path);

    if !config_path.exists() {
        debug!("no config file at {}, skipping file layer", config_path.display());
        return FileConfig::default();
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read config file {}: {}", config_path.display(), e);
            return FileConfig::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            warn!("failed to parse config file {}: {}", config_path.display(), e);
            FileConfig::default()
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file_is_empty_layer() {
        let file = load_file_config(Some(Path::new("/nonexistent/config.json")));
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn test_load_valid_json_camel_case() {
        let file = write_temp_json(
            r#"{
                "apiBase": "https://llm.internal.example.com/v1",
                "authToken": "file-token",
                "model": "qwen3-plus"
            }"#,
        );

        let config = load_file_config(Some(file.path()));
        assert_eq!(
            config.api_base.as_deref(),
            Some("https://llm.internal.example.com/v1")
        );
        assert_eq!(config.auth_token.as_deref(), Some("file-token"));
        assert_eq!(config.model.as_deref(), Some("qwen3-plus"));
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_load_invalid_json_is_empty_layer() {
        let file = write_temp_json("not valid json {{{");
        let config = load_file_config(Some(file.path()));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_empty_object() {
        let file = write_temp_json("{}");
        let config = load_file_config(Some(file.path()));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let file = write_temp_json(r#"{"apiBase": "x", "legacyField": 42}"#);
        let config = load_file_config(Some(file.path()));
        assert_eq!(config.api_base.as_deref(), Some("x"));
    }
}
