//! Core types for the SaleSmart LLM gateway.
//!
//! This crate holds everything shared between the gateway and its callers:
//!
//! - [`types`] — OpenAI-compatible chat-completions wire types and the
//!   [`types::AnalysisResult`] produced by transcript analysis
//! - [`error`] — the [`error::GatewayError`] taxonomy
//! - [`config`] — layered configuration resolution (env vars, optional
//!   config file, built-in defaults) with strict/permissive policies

pub mod config;
pub mod error;
pub mod types;

pub use config::{resolve_config, ConfigPolicy, EnvSnapshot, GatewayConfig};
pub use error::GatewayError;
pub use types::{AnalysisResult, ChatMessage, ResponseFormat};
