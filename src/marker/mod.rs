//! Inline style markers embedded in assistant replies.
//!
//! The model reports a computed assessment by embedding
//! `<!--STYLE:{...}-->` anywhere in its free text reply. Parsing pulls
//! every marker out of the text, decodes the ones that hold valid
//! JSON, and returns the remaining text for display.
mod models;
mod parse;

pub use models::{MalformedResult, StyleResult};
pub use parse::{MARKER_PREFIX, MARKER_SUFFIX, ParsedReply, parse_style_results};
