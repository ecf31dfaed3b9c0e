//! Public types for the render API

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

// Requests are a plain style result, the same object a marker carries
pub use crate::marker::StyleResult as RenderRequest;
