use std::fmt;

use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::llm::LanguageModel;
use crate::prompt;
use crate::schema::Triple;

/// What became of one extraction attempt. The model is not contractually
/// bound to follow the requested schema, so a malformed response is a normal
/// outcome, not an error: callers branch on the variant instead of checking
/// a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Triple(Triple),
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    UnparseableJson,
    NotAnObject,
    MissingField(&'static str),
    NonStringField(&'static str),
    EmptyField(&'static str),
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::UnparseableJson => write!(f, "response is not valid JSON"),
            DiscardReason::NotAnObject => write!(f, "response is not a JSON object"),
            DiscardReason::MissingField(key) => write!(f, "missing field `{}`", key),
            DiscardReason::NonStringField(key) => write!(f, "field `{}` is not a string", key),
            DiscardReason::EmptyField(key) => write!(f, "field `{}` is empty", key),
        }
    }
}

/// Ask the model for the single most salient relationship in `text`.
///
/// A model-call error propagates; everything wrong with the response body
/// yields `Discarded`, never `Err`, so one bad response cannot sink a batch.
pub async fn extract_triple<M: LanguageModel>(model: &M, text: &str) -> Result<ExtractionOutcome> {
    let raw = model.generate(&prompt::build_triple_prompt(text)).await?;
    Ok(parse_triple_response(&raw))
}

/// Strip an optional ```json fence, parse, and validate the response shape.
pub fn parse_triple_response(raw: &str) -> ExtractionOutcome {
    let cleaned = strip_code_fence(raw);

    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, raw = %raw, "Model response is not valid JSON, discarding");
            return ExtractionOutcome::Discarded(DiscardReason::UnparseableJson);
        }
    };

    match validate_triple(&value) {
        Ok(triple) => ExtractionOutcome::Triple(triple),
        Err(reason) => {
            warn!(reason = %reason, parsed = %value, "Model response failed validation, discarding");
            ExtractionOutcome::Discarded(reason)
        }
    }
}

fn validate_triple(value: &Value) -> Result<Triple, DiscardReason> {
    let obj = value.as_object().ok_or(DiscardReason::NotAnObject)?;
    let subject = require_string(obj, "node")?;
    let object = require_string(obj, "target_node")?;
    let relationship = require_string(obj, "relationship")?;
    Ok(Triple::new(subject, object, relationship))
}

fn require_string<'a>(
    obj: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, DiscardReason> {
    let field = obj.get(key).ok_or(DiscardReason::MissingField(key))?;
    let text = field.as_str().ok_or(DiscardReason::NonStringField(key))?;
    if text.is_empty() {
        return Err(DiscardReason::EmptyField(key));
    }
    Ok(text)
}

fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```json") {
        let re = Regex::new(r"```json|```").unwrap();
        return re.replace_all(trimmed, "").trim().to_string();
    }
    trimmed.to_string()
}
