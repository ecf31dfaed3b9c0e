//! Public types for the chat proxy API
use serde::{Deserialize, Serialize};

/// Body of every error returned by the proxy
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatErrorResponse {
    pub error: String,
}

impl ChatErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.into(),
        }
    }
}
