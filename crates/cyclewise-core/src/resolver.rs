//! Turns raw generator output into a structured verdict.
//!
//! Fence grammar accepted by [`extract_fenced`]:
//!
//! ```text
//! fenced  := prose* "```" tag? body ("```" | EOF)
//! tag     := [A-Za-z0-9_+-]+          (e.g. "json")
//! ```
//!
//! Only the first fenced region is used. Text without a marker is decoded
//! as a whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phase::Verdict;

const FENCE: &str = "```";

/// What to do with a verdict outside {good, ok, avoid}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidVerdictPolicy {
    /// Missing or unrecognized verdicts become "ok"
    #[default]
    CoerceToOk,
    /// Missing or unrecognized verdicts fail the parse
    Reject,
}

/// Generator output did not have the expected shape.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output is not a JSON object")]
    NotAnObject,

    #[error("invalid verdict: {0:?}")]
    InvalidVerdict(Option<String>),
}

/// Parsed generator answer, before provenance is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAdvice {
    pub verdict: Verdict,
    pub reason: String,
    pub suggestion: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseResolver {
    policy: InvalidVerdictPolicy,
}

impl ResponseResolver {
    pub fn new(policy: InvalidVerdictPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InvalidVerdictPolicy {
        self.policy
    }

    pub fn resolve(&self, raw: &str) -> Result<ResolvedAdvice, ParseError> {
        let text = extract_fenced(raw).unwrap_or(raw).trim();
        let value: serde_json::Value = serde_json::from_str(text)?;
        let obj = value.as_object().ok_or(ParseError::NotAnObject)?;

        let raw_verdict = obj.get("verdict").and_then(|v| v.as_str());
        let verdict = match (raw_verdict.map(str::parse::<Verdict>), self.policy) {
            (Some(Ok(verdict)), _) => verdict,
            (_, InvalidVerdictPolicy::CoerceToOk) => Verdict::Ok,
            (_, InvalidVerdictPolicy::Reject) => {
                return Err(ParseError::InvalidVerdict(raw_verdict.map(String::from)));
            }
        };

        let text_field = |key: &str| {
            obj.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Ok(ResolvedAdvice {
            verdict,
            reason: text_field("reason"),
            suggestion: text_field("suggestion"),
            confidence: obj.get("confidence").map(confidence_of).unwrap_or(0.0),
        })
    }
}

/// Interior of the first fenced region, or `None` when there is no marker.
pub fn extract_fenced(raw: &str) -> Option<&str> {
    let start = raw.find(FENCE)? + FENCE.len();
    let rest = &raw[start..];

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];

    let end = body.find(FENCE).unwrap_or(body.len());
    Some(body[..end].trim())
}

fn confidence_of(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
        _ => 0.0,
    }
}
