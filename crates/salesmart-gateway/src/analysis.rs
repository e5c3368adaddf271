//! Transcript analysis: prompt construction and tolerant reply parsing.
//!
//! Models do not reliably honor JSON mode, so the parser degrades in three
//! steps: direct parse, then the first-`{`-to-last-`}` substring, then a
//! synthesized default result. Step three never fails, so every analysis
//! call that reaches the parser yields a fully populated result.

use salesmart_core::types::{AnalysisResult, ChatMessage};

/// System persona for the analysis path.
pub const ANALYST_PERSONA: &str =
    "你是一个专业的销售对话分析专家。分析销售对话并提供结构化的 JSON 响应。";

/// Build the two-message sequence for a transcript analysis call.
///
/// The user message embeds the transcript and spells out the five required
/// JSON fields; field names here must stay in sync with
/// [`AnalysisResult`]'s wire keys.
pub fn build_messages(transcript: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "分析以下销售对话记录，并提供摘要、关键信号（如竞争对手提及或预算）\
         以及销售人员的能力评分（0-100）。\n\n\
         对话记录：\n{transcript}\n\n\
         请以 JSON 格式返回，包含以下字段：\n\
         - summary: 对话摘要（字符串）\n\
         - signals: 关键信号数组（字符串数组）\n\
         - abilityScore: 销售人员能力评分（0-100 的数字）\n\
         - taskScore: 任务完成度评分（0-100 的数字）\n\
         - nextStep: 下一步建议（字符串）"
    );

    vec![
        ChatMessage::system(ANALYST_PERSONA),
        ChatMessage::user(prompt),
    ]
}

/// Parse a model reply into an [`AnalysisResult`].
///
/// 1. Direct JSON parse.
/// 2. Extract the outermost `{...}` substring and parse that (covers code
///    fences and prose around the object).
/// 3. Synthesize the default result from the raw reply.
///
/// Out-of-range scores are clamped into [0, 100].
pub fn parse_reply(reply: &str) -> AnalysisResult {
    if let Ok(result) = serde_json::from_str::<AnalysisResult>(reply) {
        return result.normalized();
    }

    if let Some(fragment) = extract_json_object(reply) {
        if let Ok(result) = serde_json::from_str::<AnalysisResult>(fragment) {
            return result.normalized();
        }
    }

    AnalysisResult::fallback(reply)
}

/// The greedy outermost-braces substring, if one exists.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
