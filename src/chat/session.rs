use super::client::ChatClient;
use super::controller::{ChatState, Controller, ControllerSettings, PendingRequest};
use super::models::{Message, Transcript};
use crate::marker::StyleResult;

/// Drives a `Controller` against a `ChatClient`, one request at a
/// time.
///
/// Use `Session::new` with an `HttpChatClient` for a live
/// conversation.
pub struct Session<C: ChatClient> {
    controller: Controller,
    client: C,
}

impl<C: ChatClient + Send + Sync> Session<C> {
    pub fn new(client: C, settings: ControllerSettings) -> Self {
        Self {
            controller: Controller::new(settings),
            client,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn state(&self) -> ChatState {
        self.controller.state()
    }

    pub fn transcript(&self) -> &Transcript {
        self.controller.transcript()
    }

    pub fn assessed_styles(&self) -> &[StyleResult] {
        self.controller.assessed_styles()
    }

    async fn dispatch(&mut self, pending: PendingRequest) -> Option<&Message> {
        let PendingRequest { ticket, payload } = pending;
        tracing::debug!(
            "Sending {} message(s) for session {}",
            payload.messages.len(),
            self.controller.session_id()
        );

        match self.client.complete(&payload).await {
            Ok(body) => self.controller.receive_success(ticket, &body),
            Err(e) => self.controller.receive_failure(ticket, &e),
        }
    }

    /// Start a new session and wait for the opening reply.
    pub async fn start(&mut self) -> Option<&Message> {
        let pending = self.controller.start_session();
        self.dispatch(pending).await
    }

    /// Send a user turn and wait for the assistant's reply. Returns
    /// `None` when the input was ignored.
    pub async fn send(&mut self, text: &str) -> Option<&Message> {
        let pending = self.controller.send(text)?;
        self.dispatch(pending).await
    }

    pub fn reset(&mut self) {
        self.controller.reset()
    }
}
