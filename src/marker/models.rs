use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::parse::{MARKER_PREFIX, MARKER_SUFFIX};
use crate::framework::Framework;

pub const MIN_SCORE: i32 = -10;
pub const MAX_SCORE: i32 = 10;

/// One computed assessment result as reported by the model.
///
/// Decoding from an object never fails: missing or `null` fields are
/// empty, other non-string values are kept as their JSON text, unknown
/// fields are ignored and scores are rounded (numeric strings count,
/// anything else is 0). The values are never checked against the
/// framework vocabulary here, use `validate` for that.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct StyleResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub framework: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim1_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim1_left: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim1_right: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub dim1_score: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim2_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim2_left: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dim2_right: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub dim2_score: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub style: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum MalformedResult {
    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("Style {style} does not belong to the {framework} framework")]
    UnknownStyle { framework: String, style: String },

    #[error("{axis} score {score} is outside [-10, 10]")]
    ScoreOutOfRange { axis: &'static str, score: i32 },
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(text)
}

fn round_score(f: f64) -> i32 {
    if f.is_finite() {
        f.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
    } else {
        0
    }
}

fn lenient_score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let score = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            None => round_score(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => s.trim().parse::<f64>().map(round_score).unwrap_or_default(),
        _ => 0,
    };
    Ok(score)
}

impl StyleResult {
    /// Build a result using the framework's canonical axis labels.
    pub fn new(framework: Framework, dim1_score: i32, dim2_score: i32, style: &str, summary: &str) -> Self {
        let dim1 = framework.dim1();
        let dim2 = framework.dim2();
        Self {
            framework: framework.name().to_string(),
            dim1_label: dim1.label.to_string(),
            dim1_left: dim1.left.to_string(),
            dim1_right: dim1.right.to_string(),
            dim1_score,
            dim2_label: dim2.label.to_string(),
            dim2_left: dim2.left.to_string(),
            dim2_right: dim2.right.to_string(),
            dim2_score,
            style: style.to_string(),
            summary: summary.to_string(),
        }
    }

    /// Serialize to the inline wire format, `<!--STYLE:{...}-->`.
    pub fn to_marker(&self) -> String {
        // Serializing a struct of strings and integers can't fail
        let payload = serde_json::to_string(self).unwrap_or_default();
        format!("{}{}{}", MARKER_PREFIX, payload, MARKER_SUFFIX)
    }

    /// Stricter check than the parser performs: the framework must be
    /// known, the style must be one of its four, and both scores must
    /// be within bounds.
    pub fn validate(&self) -> Result<Framework, MalformedResult> {
        let framework: Framework = self
            .framework
            .parse()
            .map_err(|_| MalformedResult::UnknownFramework(self.framework.clone()))?;

        if !framework.has_style(&self.style) {
            return Err(MalformedResult::UnknownStyle {
                framework: self.framework.clone(),
                style: self.style.clone(),
            });
        }

        for (axis, score) in [("dim1", self.dim1_score), ("dim2", self.dim2_score)] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(MalformedResult::ScoreOutOfRange { axis, score });
            }
        }

        Ok(framework)
    }
}
