//! Gateway error taxonomy.
//!
//! Both `ask` and `analyze_conversation` surface failures through
//! [`GatewayError`] so the caller decides whether to show an inline error,
//! retry, or fall back. The gateway never swallows a transport failure.

use thiserror::Error;

/// Everything that can go wrong between a caller and the remote LLM.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required configuration value was absent from every source.
    /// Only raised under [`crate::config::ConfigPolicy::Strict`]; the
    /// message names the env vars to set.
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// The endpoint answered with a non-2xx status. The body is the raw
    /// error payload, treated as opaque text.
    #[error("LLM API request failed: {status} {body}")]
    Transport { status: u16, body: String },

    /// The endpoint could not be reached at all (connect, TLS, timeout).
    /// No HTTP status exists to carry, hence a separate variant from
    /// [`GatewayError::Transport`].
    #[error("LLM endpoint unreachable: {0}")]
    Connection(String),

    /// A 2xx response carried a body that is not a chat-completions object.
    #[error("failed to decode LLM response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status of a transport failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
