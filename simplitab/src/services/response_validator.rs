//! Explicit schema validation of model output
//!
//! The model is asked for schema-conformant JSON, but its text is still
//! checked field by field here before a [`RiffResult`] is built. Any
//! violation rejects the whole payload; nothing is partially accepted.

use crate::models::{RiffResult, TabLine};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Why a payload was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// Payload was empty or whitespace
    Empty,
    /// Payload was not valid JSON
    NotJson(String),
    /// Top-level value was not an object
    NotAnObject,
    /// Required fields absent or of the wrong type (JSON-pointer-ish paths)
    InvalidFields(Vec<String>),
    /// `tab` array had no lines
    EmptyTab,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::Empty => write!(f, "empty payload"),
            SchemaViolation::NotJson(e) => write!(f, "payload is not JSON: {}", e),
            SchemaViolation::NotAnObject => write!(f, "payload is not a JSON object"),
            SchemaViolation::InvalidFields(fields) => {
                write!(f, "missing or mistyped fields: {}", fields.join(", "))
            }
            SchemaViolation::EmptyTab => write!(f, "tab contains no lines"),
        }
    }
}

impl std::error::Error for SchemaViolation {}

/// Strip a surrounding Markdown code fence (```json ... ```), if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

fn string_field(object: &Map<String, Value>, key: &str, path: &str, invalid: &mut Vec<String>) -> String {
    match object.get(key).and_then(Value::as_str) {
        Some(value) => value.to_string(),
        None => {
            invalid.push(path.to_string());
            String::new()
        }
    }
}

/// Validate model text and build a [`RiffResult`]
pub fn parse_riff_payload(text: &str) -> Result<RiffResult, SchemaViolation> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(SchemaViolation::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| SchemaViolation::NotJson(e.to_string()))?;
    let object = value.as_object().ok_or(SchemaViolation::NotAnObject)?;

    let mut invalid = Vec::new();

    let song_title = string_field(object, "songTitle", "/songTitle", &mut invalid);
    let artist = string_field(object, "artist", "/artist", &mut invalid);
    let tuning = string_field(object, "tuning", "/tuning", &mut invalid);
    let difficulty_label = string_field(object, "difficultyLabel", "/difficultyLabel", &mut invalid);
    let explanation = string_field(object, "explanation", "/explanation", &mut invalid);

    let mut tab = Vec::new();
    match object.get("tab").and_then(Value::as_array) {
        Some(lines) => {
            for (index, line) in lines.iter().enumerate() {
                match line.as_object() {
                    Some(line) => {
                        let string_label =
                            string_field(line, "string", &format!("/tab/{}/string", index), &mut invalid);
                        let notes =
                            string_field(line, "notes", &format!("/tab/{}/notes", index), &mut invalid);
                        tab.push(TabLine { string_label, notes });
                    }
                    None => invalid.push(format!("/tab/{}", index)),
                }
            }
        }
        None => invalid.push("/tab".to_string()),
    }

    if !invalid.is_empty() {
        return Err(SchemaViolation::InvalidFields(invalid));
    }
    if tab.is_empty() {
        return Err(SchemaViolation::EmptyTab);
    }

    let result = RiffResult {
        song_title,
        artist,
        tuning,
        difficulty_label,
        tab,
        explanation,
    };

    if !result.is_aligned() {
        warn!(
            song = %result.song_title,
            lines = result.tab.len(),
            "Model returned tab lines of unequal length"
        );
    }

    Ok(result)
}
