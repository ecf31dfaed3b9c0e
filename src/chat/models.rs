//! The core models for a guided assessment conversation.
use serde::Serialize;

use crate::anthropic::{ApiMessage, Role};
use crate::marker::{StyleResult, parse_style_results};

/// One turn in the conversation. `raw_content` is what the model
/// actually said (markers included) and is what gets sent back as
/// history, `text` is what is shown.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub raw_content: String,
    pub results: Vec<StyleResult>,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Self {
            role: Role::User,
            text: text.to_string(),
            raw_content: text.to_string(),
            results: Vec::new(),
        }
    }

    /// An assistant reply with its markers extracted.
    pub fn assistant(raw_content: &str) -> Self {
        let parsed = parse_style_results(raw_content);
        Self {
            role: Role::Assistant,
            text: parsed.clean_text,
            raw_content: raw_content.to_string(),
            results: parsed.results,
        }
    }

    /// A locally generated assistant message that never came from
    /// the model.
    pub fn canned(text: &str) -> Self {
        Self {
            role: Role::Assistant,
            text: text.to_string(),
            raw_content: String::new(),
            results: Vec::new(),
        }
    }

    pub fn to_api_message(&self) -> ApiMessage {
        let content = if self.raw_content.is_empty() {
            &self.text
        } else {
            &self.raw_content
        };
        ApiMessage::new(self.role, content)
    }
}

#[derive(Default, Debug)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn to_api_messages(&self) -> Vec<ApiMessage> {
        self.0.iter().map(Message::to_api_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Framework;

    #[test]
    fn test_assistant_message_extracts_markers() {
        let marker = StyleResult::new(Framework::Leading, 4, -2, "Co-creator", "").to_marker();
        let raw = format!("Here is your result. {}", marker);
        let msg = Message::assistant(&raw);

        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.text, "Here is your result.");
        assert_eq!(msg.raw_content, raw);
        assert_eq!(msg.results.len(), 1);
    }

    #[test]
    fn test_history_prefers_raw_content() {
        let marker = StyleResult::new(Framework::Thinking, 1, 2, "Breakaway", "").to_marker();
        let reply = Message::assistant(&format!("Done {}", marker));
        let apology = Message::canned("Sorry");

        assert_eq!(reply.to_api_message().content, format!("Done {}", marker));
        assert_eq!(apology.to_api_message().content, "Sorry");
        assert_eq!(Message::user("hi").to_api_message(), ApiMessage::new(Role::User, "hi"));
    }
}
