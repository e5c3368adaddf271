//! The caller-facing assistant facade.
//!
//! The original product accumulated several near-duplicate clients for the
//! same endpoint; this is the single configurable replacement. One instance
//! holds one transport and serves both the chat screen (`ask`) and the
//! recording-finish flow (`analyze_conversation`).

use std::sync::Arc;

use tracing::debug;

use salesmart_core::config::{self, ConfigPolicy, EnvSnapshot};
use salesmart_core::error::GatewayError;
use salesmart_core::types::{AnalysisResult, ChatMessage, ResponseFormat};

use crate::analysis;
use crate::transport::{ChatTransport, HttpTransport};

/// System persona for the free-text path.
pub const ASSISTANT_PERSONA: &str = "你是 SaleSmart 助手，一个专业的销售对话智能 AI。\
    帮助用户分析商机、撰写邮件和研究客户。回答要简洁、专业且数据驱动。";

/// The SaleSmart assistant client.
///
/// Cheap to clone; safe to share across tasks. Both operations surface
/// failures as [`GatewayError`] so callers choose between an inline error
/// and a fallback. (The original swallowed analysis failures into null;
/// that inconsistency is resolved here in favor of typed errors on both
/// paths. Callers wanting the old behavior use `.ok()`.)
#[derive(Clone)]
pub struct Assistant {
    transport: Arc<dyn ChatTransport>,
}

impl Assistant {
    /// Wrap an existing transport (mock or HTTP).
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Assistant { transport }
    }

    /// Build an assistant from the process environment and the optional
    /// config file, under the given policy.
    ///
    /// Under [`ConfigPolicy::Strict`] this fails with
    /// [`GatewayError::ConfigMissing`] when no auth token is configured;
    /// callers should treat that as a fatal configuration error.
    pub fn from_env(policy: ConfigPolicy) -> Result<Self, GatewayError> {
        let env = EnvSnapshot::capture();
        let file = config::load_file_config(None);
        let resolved = config::resolve_config(&env, &file, policy)?;
        let transport = HttpTransport::new(resolved)?;
        Ok(Assistant::new(Arc::new(transport)))
    }

    /// Single-turn question to the assistant. Returns the reply text.
    ///
    /// Callers reject empty prompts before invoking; this method does not
    /// re-validate.
    pub async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
        let messages = vec![
            ChatMessage::system(ASSISTANT_PERSONA),
            ChatMessage::user(prompt),
        ];
        self.transport.complete(&messages, None).await
    }

    /// Analyze a conversation transcript ("speaker: utterance" lines) into
    /// a fully populated [`AnalysisResult`].
    pub async fn analyze_conversation(
        &self,
        transcript: &str,
    ) -> Result<AnalysisResult, GatewayError> {
        let messages = analysis::build_messages(transcript);
        let reply = self
            .transport
            .complete(&messages, Some(ResponseFormat::JsonObject))
            .await?;

        let result = analysis::parse_reply(&reply);
        debug!(
            signals = result.signals.len(),
            ability_score = result.ability_score,
            task_score = result.task_score,
            "transcript analyzed"
        );
        Ok(result)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
