//! LLM gateway for SaleSmart.
//!
//! One configurable client in front of any OpenAI-compatible
//! `/chat/completions` endpoint, with two caller-facing operations:
//! free-text Q&A for the assistant screen and structured transcript
//! analysis for the recording flow.
//!
//! # Architecture
//!
//! - [`transport::ChatTransport`] — trait the services call through; lets
//!   tests substitute a mock for the network
//! - [`transport::HttpTransport`] — the reqwest implementation, with a
//!   JSON-mode capability flag for providers without `response_format`
//! - [`assistant::Assistant`] — the caller-facing facade (`ask`,
//!   `analyze_conversation`)
//! - [`analysis`] — analysis prompt construction and the tolerant
//!   three-step reply parser

pub mod analysis;
pub mod assistant;
pub mod transport;

// Re-export main types for convenience
pub use assistant::Assistant;
pub use transport::{ChatTransport, HttpTransport};
