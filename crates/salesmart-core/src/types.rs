//! Wire types for the OpenAI-compatible chat-completions protocol, plus the
//! [`AnalysisResult`] the structured analysis service produces.
//!
//! Messages are a typed enum rather than loose maps so a malformed role or a
//! missing field is a compile error, not a runtime surprise.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format.
///
/// Each variant maps to a `role` field value. The gateway only ever sends
/// system and user turns; assistant is kept so recorded conversations can be
/// replayed verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage::Assistant {
            content: content.into(),
        }
    }

    /// The message text, regardless of role.
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System { content }
            | ChatMessage::User { content }
            | ChatMessage::Assistant { content } => content,
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion request
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Response-format hint. Provider-specific; only sent when the transport's
/// JSON-mode capability flag is on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Force the model to emit a single JSON object.
    JsonObject,
}

// ─────────────────────────────────────────────
// Chat completion response
// ─────────────────────────────────────────────

/// Raw chat completion response from an OpenAI-compatible API.
/// Used internally for deserialization.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantReply,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extract `choices[0].message.content`, treating an empty string the
    /// same as an absent field so callers never see an empty reply.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
    }
}

// ─────────────────────────────────────────────
// Analysis result
// ─────────────────────────────────────────────

/// Default next-step suggestion used when the model's reply is not JSON.
pub const DEFAULT_NEXT_STEP: &str = "继续跟进客户需求";

/// Score used in the synthesized fallback result.
pub const FALLBACK_SCORE: f64 = 70.0;

/// How many characters of a non-JSON reply become the fallback summary.
const FALLBACK_SUMMARY_CHARS: usize = 200;

/// Structured outcome of a transcript analysis.
///
/// Wire keys are camelCase to match the JSON contract the model is asked to
/// honor. All five fields are required on deserialization: a reply missing
/// any of them falls through to [`AnalysisResult::fallback`] instead of
/// producing a partially populated result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Conversation summary.
    pub summary: String,
    /// Key signals (competitor mentions, budget hints, risks).
    pub signals: Vec<String>,
    /// Salesperson ability score, 0 to 100.
    pub ability_score: f64,
    /// Task completion score, 0 to 100.
    pub task_score: f64,
    /// Suggested next step.
    pub next_step: String,
}

impl AnalysisResult {
    /// Synthesize the default result from a reply that could not be parsed
    /// as JSON. Never fails; summary is the first 200 characters of the raw
    /// reply (Unicode-safe).
    pub fn fallback(raw_reply: &str) -> Self {
        AnalysisResult {
            summary: raw_reply.chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            signals: Vec::new(),
            ability_score: FALLBACK_SCORE,
            task_score: FALLBACK_SCORE,
            next_step: DEFAULT_NEXT_STEP.to_string(),
        }
    }

    /// Clamp both scores into [0, 100]. In-range values pass through exactly.
    pub fn normalized(mut self) -> Self {
        self.ability_score = self.ability_score.clamp(0.0, 100.0);
        self.task_score = self.task_score.clamp(0.0, 100.0);
        self
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
