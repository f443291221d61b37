//! Best-effort JSON extraction from raw model output
//!
//! Model replies routinely wrap the requested JSON object in markdown code
//! fences or surround it with prose, and smaller models emit Python-flavored
//! syntax (single quotes, trailing commas). This module locates the candidate
//! object and applies a bounded set of textual repairs before giving up.
//!
//! The repairs are heuristic, not a parser: replacing single quotes corrupts
//! apostrophes inside string values. That limitation is accepted and encoded
//! in the tests below.

use regex::Regex;
use serde_json::{Map, Value};

/// Locates and parses an embedded JSON object in free-form model text.
///
/// Absence of a result is the only failure signal; extraction never errors.
pub struct ResponseExtractor {
    fence_open: Regex,
    fence_close: Regex,
    trailing_comma: Regex,
}

impl ResponseExtractor {
    pub fn new() -> Self {
        Self {
            fence_open: Regex::new(r"(?i)^\s*```[a-z]*[ \t]*\r?\n?").unwrap(),
            fence_close: Regex::new(r"\s*```\s*$").unwrap(),
            trailing_comma: Regex::new(r",([ \t\r\n]*[}\]])").unwrap(),
        }
    }

    /// Extract the first-`{`-to-last-`}` span and parse it, repairing common
    /// model syntax errors. Returns `None` if no object can be recovered.
    pub fn extract(&self, raw: &str) -> Option<Map<String, Value>> {
        let stripped = self.strip_fences(raw);
        let candidate = brace_span(stripped)?;

        if let Some(object) = parse_object(candidate) {
            return Some(object);
        }

        // Repair 1: single quotes for double quotes. Best effort; breaks on
        // apostrophes inside string values.
        let requoted = candidate.replace('\'', "\"");
        if let Some(object) = parse_object(&requoted) {
            return Some(object);
        }

        // Repair 2: trailing commas before a closing brace or bracket.
        let decommaed = self.trailing_comma.replace_all(&requoted, "$1");
        parse_object(&decommaed)
    }

    /// Remove a leading language-tagged code fence and its closing fence.
    fn strip_fences<'a>(&self, raw: &'a str) -> &'a str {
        let mut text = raw.trim();
        if let Some(open) = self.fence_open.find(text) {
            text = &text[open.end()..];
        }
        if let Some(close) = self.fence_close.find(text) {
            text = &text[..close.start()];
        }
        text
    }
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate object: from the first `{` to the last `}`, greedy across
/// newlines. `None` when the text holds no such pair.
fn brace_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if last < first {
        return None;
    }
    Some(&text[first..=last])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
