//! Parsing of LLM classification replies.
//!
//! The model is told to answer with a single JSON object, but real replies
//! arrive wrapped in code fences, preceded by prose, or with fields missing.
//! Parsing here is strict about the JSON itself and lenient about the
//! decoration around it: either we get a fully populated
//! [`ClassificationResult`] or an [`LlmError::InvalidJson`], never a
//! half-filled value.

use crate::category::Category;
use crate::error::LlmError;
use serde::{Deserialize, Serialize};

/// Author string the prompt tells the model to emit when it cannot find one.
const AUTHOR_PLACEHOLDER: &str = "Unknown Author";

/// Fully resolved classification of one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub summary: String,
    pub category: Category,
    pub author: String,
}

/// Raw shape of the model's JSON object, before defaulting.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

/// Parse a raw model reply into a classification result.
///
/// `fallback_author` is used whenever the model omits the author or emits
/// the literal placeholder. A missing or unrecognized category defaults to
/// `General_AI`; a missing summary defaults to the empty string.
pub fn parse_reply(
    reply: &str,
    fallback_author: &str,
) -> Result<ClassificationResult, LlmError> {
    let stripped = strip_code_fences(reply.trim());
    let json_str = extract_json_object(stripped)
        .ok_or_else(|| LlmError::InvalidJson("no JSON object in reply".to_string()))?;

    let raw: RawReply =
        serde_json::from_str(json_str).map_err(|e| LlmError::InvalidJson(e.to_string()))?;

    let category = raw
        .category
        .as_deref()
        .and_then(Category::parse)
        .unwrap_or(Category::GeneralAi);

    let author = match raw.author {
        Some(a) if !a.is_empty() && a != AUTHOR_PLACEHOLDER => a,
        _ => fallback_author.to_string(),
    };

    Ok(ClassificationResult {
        summary: raw.summary.unwrap_or_default(),
        category,
        author,
    })
}

/// Remove one layer of markdown code-fence decoration, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Slice out the first `{` .. last `}` span, where the model's JSON lives.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
