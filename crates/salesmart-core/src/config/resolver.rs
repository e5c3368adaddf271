//! Layered configuration resolution.
//!
//! Each field resolves independently, first non-empty source wins:
//! 1. App-prefixed env var (`SALESMART_*`)
//! 2. Unprefixed env var (`LLM_*`)
//! 3. Config file (`~/.salesmart/config.json`)
//! 4. Built-in default
//!
//! Resolution reads from an [`EnvSnapshot`] captured once, so it is pure and
//! deterministic for a given snapshot and performs no I/O or network access.

use std::collections::HashMap;

use tracing::debug;

use super::schema::{
    FileConfig, GatewayConfig, DEFAULT_API_BASE, DEFAULT_AUTH_TOKEN, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::error::GatewayError;

// ─────────────────────────────────────────────
// Env var names, in precedence order
// ─────────────────────────────────────────────

/// Env vars for the API base URL.
pub const API_BASE_VARS: &[&str] = &["SALESMART_API_BASE", "LLM_API_BASE"];

/// Env vars for the auth token.
pub const AUTH_TOKEN_VARS: &[&str] = &["SALESMART_AUTH_TOKEN", "LLM_AUTH_TOKEN"];

/// Env vars for the model identifier.
pub const MODEL_VARS: &[&str] = &["SALESMART_MODEL", "LLM_DEFAULT_MODEL"];

/// Env vars for the request timeout in seconds.
pub const TIMEOUT_VARS: &[&str] = &["SALESMART_TIMEOUT_SECS", "LLM_TIMEOUT_SECS"];

// ─────────────────────────────────────────────
// ConfigPolicy
// ─────────────────────────────────────────────

/// How to treat a token that resolves from no source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigPolicy {
    /// Fall back to the built-in development token. Resolution never fails.
    Permissive,
    /// Fail with [`GatewayError::ConfigMissing`] and a remediation message
    /// naming the env vars to set.
    Strict,
}

// ─────────────────────────────────────────────
// EnvSnapshot
// ─────────────────────────────────────────────

/// Immutable snapshot of environment variables.
///
/// Captured once at client construction; tests build one from literal pairs
/// instead of mutating the process environment.
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        EnvSnapshot {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs (used by tests).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSnapshot {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

// ─────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────

/// First non-empty value from the env var list, then the file layer.
fn resolve_field<'a>(
    env: &'a EnvSnapshot,
    var_names: &[&str],
    file_value: Option<&'a str>,
) -> Option<&'a str> {
    var_names
        .iter()
        .find_map(|name| env.get(name))
        .or_else(|| file_value.filter(|value| !value.is_empty()))
}

/// Whether an auth token resolves from an explicit source (env var or
/// config file) rather than the built-in default, i.e. whether strict-mode
/// resolution would succeed for the same snapshot/file pair.
pub fn auth_token_configured(env: &EnvSnapshot, file: &FileConfig) -> bool {
    resolve_field(env, AUTH_TOKEN_VARS, file.auth_token.as_deref()).is_some()
}

/// Resolve a [`GatewayConfig`] from the layered sources.
///
/// Under [`ConfigPolicy::Strict`] a token absent from every source is a
/// construction-time failure; under [`ConfigPolicy::Permissive`] every field
/// falls back to its built-in default and resolution cannot fail.
pub fn resolve_config(
    env: &EnvSnapshot,
    file: &FileConfig,
    policy: ConfigPolicy,
) -> Result<GatewayConfig, GatewayError> {
    let api_base = resolve_field(env, API_BASE_VARS, file.api_base.as_deref())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string();

    let model = resolve_field(env, MODEL_VARS, file.model.as_deref())
        .unwrap_or(DEFAULT_MODEL)
        .to_string();

    // Timeout is numeric: an unparsable env value falls through to the file
    // layer rather than poisoning resolution.
    let timeout_secs = TIMEOUT_VARS
        .iter()
        .find_map(|name| env.get(name))
        .and_then(|value| value.parse::<u64>().ok())
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let auth_token = match resolve_field(env, AUTH_TOKEN_VARS, file.auth_token.as_deref()) {
        Some(token) => token.to_string(),
        None => match policy {
            ConfigPolicy::Permissive => DEFAULT_AUTH_TOKEN.to_string(),
            ConfigPolicy::Strict => {
                return Err(GatewayError::ConfigMissing(format!(
                    "no auth token configured; set {} or {} (or \"authToken\" in \
                     ~/.salesmart/config.json)",
                    AUTH_TOKEN_VARS[0], AUTH_TOKEN_VARS[1]
                )));
            }
        },
    };

    // Non-sensitive diagnostic snapshot: presence only, never the token.
    debug!(
        api_base = %api_base,
        model = %model,
        timeout_secs,
        has_auth_token = !auth_token.is_empty(),
        "gateway configuration resolved"
    );

    Ok(GatewayConfig {
        api_base,
        auth_token,
        model,
        timeout_secs,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_env() -> EnvSnapshot {
        EnvSnapshot::default()
    }

    // ── Precedence: prefixed env > unprefixed env > file > default ──

    #[test]
    fn test_prefixed_env_wins() {
        let env = EnvSnapshot::from_pairs([
            ("SALESMART_API_BASE", "A"),
            ("LLM_API_BASE", "B"),
        ]);
        let file = FileConfig {
            api_base: Some("C".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&env, &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.api_base, "A");
    }

    #[test]
    fn test_unprefixed_env_second() {
        let env = EnvSnapshot::from_pairs([("LLM_API_BASE", "B")]);
        let file = FileConfig {
            api_base: Some("C".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&env, &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.api_base, "B");
    }

    #[test]
    fn test_file_layer_third() {
        let file = FileConfig {
            api_base: Some("C".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&empty_env(), &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.api_base, "C");
    }

    #[test]
    fn test_default_last() {
        let config =
            resolve_config(&empty_env(), &FileConfig::default(), ConfigPolicy::Permissive)
                .unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.auth_token, DEFAULT_AUTH_TOKEN);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_empty_env_value_treated_as_unset() {
        let env = EnvSnapshot::from_pairs([
            ("SALESMART_MODEL", ""),
            ("LLM_DEFAULT_MODEL", "qwen3-plus"),
        ]);

        let config =
            resolve_config(&env, &FileConfig::default(), ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.model, "qwen3-plus");
    }

    #[test]
    fn test_fields_resolve_independently() {
        let env = EnvSnapshot::from_pairs([("SALESMART_MODEL", "env-model")]);
        let file = FileConfig {
            api_base: Some("https://file.example.com/v1".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&env, &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.model, "env-model");
        assert_eq!(config.api_base, "https://file.example.com/v1");
        assert_eq!(config.auth_token, DEFAULT_AUTH_TOKEN);
    }

    // ── Timeout ──

    #[test]
    fn test_timeout_from_env() {
        let env = EnvSnapshot::from_pairs([("SALESMART_TIMEOUT_SECS", "90")]);
        let config =
            resolve_config(&env, &FileConfig::default(), ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.timeout_secs, 90);
    }

    #[test]
    fn test_timeout_unparsable_falls_through() {
        let env = EnvSnapshot::from_pairs([("SALESMART_TIMEOUT_SECS", "soon")]);
        let file = FileConfig {
            timeout_secs: Some(45),
            ..Default::default()
        };
        let config = resolve_config(&env, &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn test_timeout_from_file() {
        let file = FileConfig {
            timeout_secs: Some(12),
            ..Default::default()
        };
        let config = resolve_config(&empty_env(), &file, ConfigPolicy::Permissive).unwrap();
        assert_eq!(config.timeout_secs, 12);
    }

    // ── Policies ──

    #[test]
    fn test_strict_fails_without_token() {
        let err = resolve_config(&empty_env(), &FileConfig::default(), ConfigPolicy::Strict)
            .unwrap_err();

        match err {
            GatewayError::ConfigMissing(msg) => {
                // Remediation message must name the env vars to set
                assert!(msg.contains("SALESMART_AUTH_TOKEN"));
                assert!(msg.contains("LLM_AUTH_TOKEN"));
            }
            other => panic!("expected ConfigMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_succeeds_with_env_token() {
        let env = EnvSnapshot::from_pairs([("LLM_AUTH_TOKEN", "sk-real-key")]);
        let config = resolve_config(&env, &FileConfig::default(), ConfigPolicy::Strict).unwrap();
        assert_eq!(config.auth_token, "sk-real-key");
    }

    #[test]
    fn test_strict_accepts_file_token() {
        let file = FileConfig {
            auth_token: Some("file-token".to_string()),
            ..Default::default()
        };
        let config = resolve_config(&empty_env(), &file, ConfigPolicy::Strict).unwrap();
        assert_eq!(config.auth_token, "file-token");
    }

    #[test]
    fn test_permissive_never_fails() {
        let config =
            resolve_config(&empty_env(), &FileConfig::default(), ConfigPolicy::Permissive)
                .unwrap();
        assert!(!config.auth_token.is_empty());
        assert!(!config.api_base.is_empty());
    }

    // ── Token presence ──

    #[test]
    fn test_token_configured_from_env() {
        let env = EnvSnapshot::from_pairs([("LLM_AUTH_TOKEN", "sk-real-key")]);
        assert!(auth_token_configured(&env, &FileConfig::default()));
    }

    #[test]
    fn test_token_configured_from_file() {
        let file = FileConfig {
            auth_token: Some("file-token".to_string()),
            ..Default::default()
        };
        assert!(auth_token_configured(&empty_env(), &file));
    }

    #[test]
    fn test_token_not_configured_when_only_default_applies() {
        assert!(!auth_token_configured(&empty_env(), &FileConfig::default()));
        // Empty values do not count as configured
        let env = EnvSnapshot::from_pairs([("SALESMART_AUTH_TOKEN", "")]);
        let file = FileConfig {
            auth_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!auth_token_configured(&env, &file));
    }

    #[test]
    fn test_token_presence_agrees_with_strict_resolution() {
        let cases = [
            EnvSnapshot::default(),
            EnvSnapshot::from_pairs([("SALESMART_AUTH_TOKEN", "tok")]),
        ];
        for env in cases {
            let file = FileConfig::default();
            assert_eq!(
                auth_token_configured(&env, &file),
                resolve_config(&env, &file, ConfigPolicy::Strict).is_ok()
            );
        }
    }

    // ── Determinism ──

    #[test]
    fn test_resolution_is_deterministic_for_a_snapshot() {
        let env = EnvSnapshot::from_pairs([
            ("SALESMART_API_BASE", "https://a.example.com/v1"),
            ("LLM_AUTH_TOKEN", "tok"),
        ]);
        let file = FileConfig::default();

        let first = resolve_config(&env, &file, ConfigPolicy::Strict).unwrap();
        let second = resolve_config(&env, &file, ConfigPolicy::Strict).unwrap();
        assert_eq!(first, second);
    }
}
