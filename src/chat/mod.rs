//! Client side conversation handling: the transcript, the state
//! machine that guards it, and the driver that talks to the proxy.
mod client;
mod controller;
mod models;
mod session;

pub use client::{ChatClient, HttpChatClient};
pub use controller::{
    APOLOGY, ChatState, Controller, ControllerSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_OPENING_MAX_TOKENS, FALLBACK_WELCOME, OPENING_MESSAGE, PendingRequest, RequestTicket,
    TurnKind,
};
pub use models::{Message, Transcript};
pub use session::Session;
