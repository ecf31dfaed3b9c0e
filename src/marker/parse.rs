use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::models::StyleResult;

pub const MARKER_PREFIX: &str = "<!--STYLE:";
pub const MARKER_SUFFIX: &str = "-->";

// Non-greedy and single line so two markers on the same line stay
// separate spans.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--STYLE:(.*?)-->").expect("Invalid marker pattern"));

/// An assistant reply split into the text to display and the results
/// it reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedReply {
    pub clean_text: String,
    pub results: Vec<StyleResult>,
}

// Only text that isn't JSON, or JSON that isn't an object, is
// rejected. Field types are coerced by `StyleResult`'s decoder.
fn decode_payload(payload: &str) -> Option<StyleResult> {
    let value = match serde_json::from_str::<Value>(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse style result: {} - {}", e, payload);
            return None;
        }
    };

    if !value.is_object() {
        tracing::warn!("Style result is not an object: {}", payload);
        return None;
    }

    match StyleResult::deserialize(value) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("Failed to decode style result: {} - {}", e, payload);
            None
        }
    }
}

/// Extract every style marker from `text`.
///
/// Results keep the order the markers appear in. A marker whose
/// payload doesn't decode is dropped without affecting the others,
/// but its span is still removed from the clean text.
pub fn parse_style_results(text: &str) -> ParsedReply {
    let results = MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|payload| decode_payload(payload.as_str()))
        .collect();

    let clean_text = MARKER_RE.replace_all(text, "").trim().to_string();

    ParsedReply {
        clean_text,
        results,
    }
}
