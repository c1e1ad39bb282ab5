//! Best-effort extraction of a JSON document from model output
//!
//! Models asked for JSON answer with anything from a bare object to prose
//! wrapped around a fenced code block. [`extract`] picks exactly one
//! candidate span and either parses it or hands back the original text.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Result of [`extract`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedPayload {
    /// A candidate span parsed as JSON
    Json(Value),
    /// No parseable candidate; the text is kept verbatim
    Raw {
        #[serde(rename = "rawResponse")]
        raw_response: String,
    },
}

impl ExtractedPayload {
    /// Whether a JSON document was recovered
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Convert into the JSON shape placed in the response envelope
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Raw { raw_response } => serde_json::json!({ "rawResponse": raw_response }),
        }
    }
}

/// Where the candidate span came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    JsonFence,
    AnyFence,
    Braces,
}

impl Candidate {
    const fn as_str(self) -> &'static str {
        match self {
            Self::JsonFence => "json_fence",
            Self::AnyFence => "fence",
            Self::Braces => "braces",
        }
    }
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("must be valid regex"))
}

fn any_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("must be valid regex"))
}

/// Locate the single candidate span, first match wins
fn locate(text: &str) -> Option<(Candidate, &str)> {
    if let Some(caps) = json_fence().captures(text) {
        return caps.get(1).map(|m| (Candidate::JsonFence, m.as_str()));
    }

    if let Some(caps) = any_fence().captures(text) {
        return caps.get(1).map(|m| (Candidate::AnyFence, m.as_str()));
    }

    // Greedy: first `{` through last `}`, never a narrower inner object
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| (Candidate::Braces, &text[start..=end]))
}

/// Extract a JSON document embedded in `text`
///
/// Tries, in order: a ```` ```json ```` fenced block, any fenced block, then
/// the greedy span from the first `{` to the last `}`. Only that one
/// candidate is parsed; if it is not valid JSON, or nothing was found, the
/// whole input comes back as [`ExtractedPayload::Raw`]. Never fails.
pub fn extract(text: &str) -> ExtractedPayload {
    let Some((candidate, span)) = locate(text) else {
        tracing::debug!("no JSON candidate in model output");
        return raw(text);
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) => {
            tracing::debug!(candidate = candidate.as_str(), "extracted JSON from model output");
            ExtractedPayload::Json(value)
        }
        Err(e) => {
            tracing::debug!(candidate = candidate.as_str(), error = %e, "JSON candidate failed to parse");
            raw(text)
        }
    }
}

fn raw(text: &str) -> ExtractedPayload {
    ExtractedPayload::Raw {
        raw_response: text.to_owned(),
    }
}

/// Truncate `text` to `limit` characters, appending `...` when shortened
pub fn summarize(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}
