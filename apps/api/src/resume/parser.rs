//! Resume Parser — turns extracted resume text into a complete `ResumeRecord`.
//!
//! Flow: build prompt → one AI call → JSON parse → field repair.
//! Never fails: any gateway or JSON problem produces a deterministic fallback
//! record, and `ParseSource` says which path was taken.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, AiGateway};
use crate::resume::models::{education_from_value, experience_from_value, value_text, ResumeRecord};
use crate::resume::prompts::RESUME_PARSE_PROMPT;

/// Skills recognised by the keyword fallback, matched case-insensitively as substrings.
pub const SKILL_VOCABULARY: [&str; 9] = [
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "fastapi",
    "react",
    "html",
    "css",
];

const SUMMARY_FALLBACK_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The gateway call itself failed (transport, provider, missing key, empty output).
    GatewayFailed(String),
    /// The model answered, but not with JSON.
    InvalidJson(String),
    /// The model answered with JSON that is not an object.
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseSource {
    Ai,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone)]
pub struct ParsedResume {
    pub record: ResumeRecord,
    pub source: ParseSource,
}

pub fn build_parse_prompt(text: &str) -> String {
    RESUME_PARSE_PROMPT
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", text)
}

/// Parses resume text through the gateway, repairing or replacing whatever
/// the model gets wrong.
pub async fn parse_resume(text: &str, gateway: &dyn AiGateway) -> ParsedResume {
    let prompt = build_parse_prompt(text);

    let reply = match gateway.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Resume parse fell back: gateway failed: {e}");
            return fallback(text, FallbackReason::GatewayFailed(e.to_string()));
        }
    };

    let parsed = match serde_json::from_str::<Value>(strip_json_fences(&reply)) {
        Ok(value) => value,
        Err(e) => {
            warn!("Resume parse fell back: model output is not JSON: {e}");
            return fallback(text, FallbackReason::InvalidJson(e.to_string()));
        }
    };

    match parsed {
        Value::Object(obj) => {
            info!("Resume parsed by model");
            ParsedResume {
                record: repair(&obj, text),
                source: ParseSource::Ai,
            }
        }
        _ => {
            warn!("Resume parse fell back: model JSON is not an object");
            fallback(text, FallbackReason::NotAnObject)
        }
    }
}

fn fallback(text: &str, reason: FallbackReason) -> ParsedResume {
    ParsedResume {
        record: ResumeRecord {
            summary: first_lines(text, SUMMARY_FALLBACK_LINES),
            skills: keyword_skills(text),
            experience: Vec::new(),
            education: Vec::new(),
        },
        source: ParseSource::Fallback(reason),
    }
}

/// Builds a full record from the model's object, patching missing or
/// mis-shaped fields.
fn repair(obj: &Map<String, Value>, text: &str) -> ResumeRecord {
    let summary = obj
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .unwrap_or_else(|| first_lines(text, SUMMARY_FALLBACK_LINES));

    let skills = match obj.get("skills").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(value_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => keyword_skills(text),
    };

    ResumeRecord {
        summary,
        skills,
        experience: obj
            .get("experience")
            .map(experience_from_value)
            .unwrap_or_default(),
        education: obj
            .get("education")
            .map(education_from_value)
            .unwrap_or_default(),
    }
}

/// The first `n` lines of `text`, joined with `\n`.
pub fn first_lines(text: &str, n: usize) -> String {
    text.lines().take(n).collect::<Vec<_>>().join("\n")
}

/// Vocabulary skills found in `text`, in vocabulary order, first letter upper-cased.
pub fn keyword_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|kw| haystack.contains(*kw))
        .map(|kw| capitalize(kw))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
