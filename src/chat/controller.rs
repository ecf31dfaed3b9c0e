use anyhow::Error;
use serde_json::Value;
use uuid::Uuid;

use super::models::{Message, Transcript};
use crate::anthropic::{ApiMessage, MessagesRequest, Role, response_text};
use crate::marker::StyleResult;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_OPENING_MAX_TOKENS: u32 = 1000;

pub const OPENING_MESSAGE: &str = "Hello, I'd like to explore my thinking and leadership styles.";
pub const FALLBACK_WELCOME: &str = "Welcome. I'm here to help you explore your thinking, managing, and leading styles. What brings you here today — is there a particular challenge or situation you'd like to reflect on?";
pub const APOLOGY: &str = "I'm sorry, something went wrong. Could you try again?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatState {
    /// No session started yet, or the session was reset
    Welcome,
    AwaitingInput,
    /// Exactly one request is in flight
    Sending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnKind {
    Opening,
    Reply,
}

/// Identifies the request a response belongs to. Only the ticket of
/// the current in-flight request is accepted; anything else is a
/// reply to a request the controller no longer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    seq: u64,
    kind: TurnKind,
}

impl RequestTicket {
    pub fn kind(&self) -> TurnKind {
        self.kind
    }
}

/// A request the caller must deliver to the proxy, then report back
/// with `receive_success` or `receive_failure`.
#[derive(Debug)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub payload: MessagesRequest,
}

#[derive(Clone, Debug)]
pub struct ControllerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub opening_max_tokens: u32,
    pub system: String,
}

impl ControllerSettings {
    pub fn new(system: &str) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            opening_max_tokens: DEFAULT_OPENING_MAX_TOKENS,
            system: system.to_string(),
        }
    }
}

/// Client side state machine for one assessment conversation.
///
/// Owns the transcript and the styles assessed so far. All mutation
/// goes through the transition functions: `start_session`, `send`,
/// `receive_success`, `receive_failure` and `reset`.
pub struct Controller {
    settings: ControllerSettings,
    state: ChatState,
    transcript: Transcript,
    assessed_styles: Vec<StyleResult>,
    // Bumped whenever the session is started or reset
    generation: u64,
    seq: u64,
    in_flight: Option<RequestTicket>,
    session_id: Uuid,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            state: ChatState::Welcome,
            transcript: Transcript::new(),
            assessed_styles: Vec::new(),
            generation: 0,
            seq: 0,
            in_flight: None,
            session_id: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ChatState::Sending
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn assessed_styles(&self) -> &[StyleResult] {
        &self.assessed_styles
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn new_session(&mut self) {
        self.transcript.clear();
        self.assessed_styles.clear();
        self.generation += 1;
        self.in_flight = None;
        self.session_id = Uuid::new_v4();
    }

    fn begin_request(
        &mut self,
        kind: TurnKind,
        max_tokens: u32,
        messages: Vec<ApiMessage>,
    ) -> PendingRequest {
        self.seq += 1;
        let ticket = RequestTicket {
            generation: self.generation,
            seq: self.seq,
            kind,
        };
        self.in_flight = Some(ticket);
        self.state = ChatState::Sending;

        PendingRequest {
            ticket,
            payload: MessagesRequest {
                model: self.settings.model.clone(),
                max_tokens,
                system: self.settings.system.clone(),
                messages,
            },
        }
    }

    /// Start a fresh session. The synthetic opening turn is sent on the
    /// user's behalf and is not part of the transcript.
    pub fn start_session(&mut self) -> PendingRequest {
        self.new_session();
        tracing::debug!("Starting session {}", self.session_id);

        let opening = vec![ApiMessage::new(Role::User, OPENING_MESSAGE)];
        self.begin_request(TurnKind::Opening, self.settings.opening_max_tokens, opening)
    }

    /// Back to the welcome screen. A reply still in flight is ignored
    /// when it arrives.
    pub fn reset(&mut self) {
        self.new_session();
        self.state = ChatState::Welcome;
    }

    /// Append a user turn and build the request carrying the full
    /// transcript. Returns `None` for blank input, while another
    /// request is in flight, or before a session has started.
    pub fn send(&mut self, text: &str) -> Option<PendingRequest> {
        let text = text.trim();
        if text.is_empty() || self.state != ChatState::AwaitingInput {
            return None;
        }

        self.transcript.push(Message::user(text));
        let messages = self.transcript.to_api_messages();
        Some(self.begin_request(TurnKind::Reply, self.settings.max_tokens, messages))
    }

    fn accept(&mut self, ticket: RequestTicket) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::warn!(
                "Discarding stale response for request {} of generation {}",
                ticket.seq,
                ticket.generation
            );
            return false;
        }
        self.in_flight = None;
        self.state = ChatState::AwaitingInput;
        true
    }

    /// Apply a response body from the proxy. A body carrying an
    /// `error` field, or no content, counts as a failure.
    pub fn receive_success(&mut self, ticket: RequestTicket, body: &Value) -> Option<&Message> {
        if let Some(err) = body.get("error").filter(|err| !err.is_null()) {
            let msg = err.as_str().map(String::from).unwrap_or_else(|| err.to_string());
            return self.receive_failure(ticket, &Error::msg(msg));
        }
        let raw_text = match response_text(body) {
            Ok(text) => text,
            Err(e) => return self.receive_failure(ticket, &e),
        };

        if !self.accept(ticket) {
            return None;
        }

        let msg = Message::assistant(&raw_text);
        for result in msg.results.iter() {
            if let Err(e) = result.validate() {
                tracing::warn!("Model reported a malformed style result: {}", e);
            }
        }
        // Only answers to the user's turns count as assessments
        if ticket.kind == TurnKind::Reply {
            self.assessed_styles.extend(msg.results.iter().cloned());
        }
        self.transcript.push(msg);
        self.transcript.last()
    }

    /// Record a failed turn as a fixed assistant message. A failed
    /// opening turn falls back to a canned welcome instead.
    pub fn receive_failure(&mut self, ticket: RequestTicket, error: &Error) -> Option<&Message> {
        if !self.accept(ticket) {
            return None;
        }
        tracing::error!("Chat request failed: {}", error);

        let msg = match ticket.kind {
            TurnKind::Opening => Message::canned(FALLBACK_WELCOME),
            TurnKind::Reply => Message::canned(APOLOGY),
        };
        self.transcript.push(msg);
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Framework;
    use serde_json::json;

    fn controller() -> Controller {
        Controller::new(ControllerSettings::new("You are a coach."))
    }

    fn text_body(text: &str) -> Value {
        json!({"content": [{"type": "text", "text": text}]})
    }

    fn started() -> Controller {
        let mut c = controller();
        let pending = c.start_session();
        c.receive_success(pending.ticket, &text_body("Welcome!"));
        c
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.state(), ChatState::Welcome);
        assert!(c.transcript().is_empty());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_start_session_sends_opening_turn() {
        let mut c = controller();
        let pending = c.start_session();

        assert_eq!(c.state(), ChatState::Sending);
        assert_eq!(pending.ticket.kind(), TurnKind::Opening);
        assert_eq!(pending.payload.max_tokens, DEFAULT_OPENING_MAX_TOKENS);
        assert_eq!(pending.payload.model, DEFAULT_MODEL);
        assert_eq!(pending.payload.system, "You are a coach.");
        assert_eq!(
            pending.payload.messages,
            vec![ApiMessage::new(Role::User, OPENING_MESSAGE)]
        );
        assert!(c.transcript().is_empty());

        c.receive_success(pending.ticket, &text_body("Welcome! What brings you here?"));
        assert_eq!(c.state(), ChatState::AwaitingInput);
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].role, Role::Assistant);
        assert_eq!(c.transcript().messages()[0].text, "Welcome! What brings you here?");
    }

    #[test]
    fn test_failed_opening_uses_fallback_welcome() {
        let mut c = controller();
        let pending = c.start_session();
        c.receive_failure(pending.ticket, &Error::msg("connection refused"));

        assert_eq!(c.state(), ChatState::AwaitingInput);
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].text, FALLBACK_WELCOME);
        assert!(FALLBACK_WELCOME.contains("What brings you here today — is there a particular challenge"));
    }

    #[test]
    fn test_send_ignores_blank_input() {
        let mut c = started();
        assert!(c.send("").is_none());
        assert!(c.send("   \n\t").is_none());
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.state(), ChatState::AwaitingInput);
    }

    #[test]
    fn test_send_before_start_is_ignored() {
        let mut c = controller();
        assert!(c.send("hello").is_none());
        assert!(c.transcript().is_empty());
    }

    #[test]
    fn test_send_while_in_flight_is_ignored() {
        let mut c = started();
        let first = c.send("I run a small team");
        assert!(first.is_some());
        assert_eq!(c.transcript().len(), 2);

        assert!(c.send("and another thing").is_none());
        assert_eq!(c.transcript().len(), 2);
        assert!(c.is_loading());
    }

    #[test]
    fn test_send_builds_full_history() {
        let mut c = started();
        let pending = c.send("  I lead a product team.  ").unwrap();

        assert_eq!(pending.payload.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(
            pending.payload.messages,
            vec![
                ApiMessage::new(Role::Assistant, "Welcome!"),
                ApiMessage::new(Role::User, "I lead a product team."),
            ]
        );
        assert_eq!(c.transcript().last().unwrap().text, "I lead a product team.");
    }

    #[test]
    fn test_receive_success_collects_results() {
        let mut c = started();
        let pending = c.send("I prefer a plan").unwrap();
        let marker =
            StyleResult::new(Framework::Thinking, -6, 4, "Incremental", "Reasoned and open.").to_marker();
        let body = json!({
            "content": [
                {"type": "text", "text": format!("Thanks! {} Let's continue.", marker)},
                {"type": "text", "text": "What patterns do you notice?"}
            ]
        });

        let msg = c.receive_success(pending.ticket, &body).unwrap().clone();
        assert_eq!(msg.text, "Thanks!  Let's continue.\nWhat patterns do you notice?");
        assert_eq!(msg.results.len(), 1);
        assert_eq!(c.assessed_styles().len(), 1);
        assert_eq!(c.assessed_styles()[0].style, "Incremental");
        assert_eq!(c.state(), ChatState::AwaitingInput);
    }

    #[test]
    fn test_opening_results_are_not_assessed() {
        let marker = StyleResult::new(Framework::Thinking, 2, 2, "Breakaway", "").to_marker();
        let mut c = controller();
        let pending = c.start_session();

        let msg = c
            .receive_success(pending.ticket, &text_body(&format!("Welcome! {}", marker)))
            .unwrap();
        assert_eq!(msg.results.len(), 1);
        assert!(c.assessed_styles().is_empty());
    }

    #[test]
    fn test_error_field_is_a_failure() {
        let mut c = started();
        let pending = c.send("hello").unwrap();
        c.receive_success(pending.ticket, &json!({"error": "rate limited"}));

        let last = c.transcript().last().unwrap();
        assert_eq!(last.text, APOLOGY);
        assert!(last.results.is_empty());
        assert_eq!(last.raw_content, "");
        assert_eq!(c.state(), ChatState::AwaitingInput);
    }

    #[test]
    fn test_missing_content_is_a_failure() {
        let mut c = started();
        let pending = c.send("hello").unwrap();
        c.receive_success(pending.ticket, &json!({"id": "msg_01"}));

        assert_eq!(c.transcript().last().unwrap().text, APOLOGY);
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut c = started();
        let old = c.send("first session").unwrap();

        c.reset();
        assert_eq!(c.state(), ChatState::Welcome);
        assert!(c.transcript().is_empty());

        let opening = c.start_session();
        assert!(c.receive_success(old.ticket, &text_body("late reply")).is_none());
        assert!(c.transcript().is_empty());
        assert_eq!(c.state(), ChatState::Sending);

        c.receive_success(opening.ticket, &text_body("Fresh welcome"));
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].text, "Fresh welcome");
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut c = started();
        let old = c.send("first").unwrap();
        c.reset();

        assert!(c.receive_failure(old.ticket, &Error::msg("timeout")).is_none());
        assert!(c.transcript().is_empty());
        assert_eq!(c.state(), ChatState::Welcome);
    }

    #[test]
    fn test_duplicate_response_is_discarded() {
        let mut c = started();
        let pending = c.send("hello").unwrap();
        c.receive_success(pending.ticket, &text_body("one"));
        assert!(c.receive_success(pending.ticket, &text_body("two")).is_none());
        assert_eq!(c.transcript().len(), 3);
    }

    #[test]
    fn test_new_session_clears_assessed_styles() {
        let mut c = started();
        let pending = c.send("done").unwrap();
        let marker = StyleResult::new(Framework::Managing, 3, 3, "Venturing", "").to_marker();
        c.receive_success(pending.ticket, &text_body(&marker));
        assert_eq!(c.assessed_styles().len(), 1);

        let first_session = c.session_id();
        c.start_session();
        assert!(c.assessed_styles().is_empty());
        assert!(c.transcript().is_empty());
        assert_ne!(c.session_id(), first_session);
    }
}
