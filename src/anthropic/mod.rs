pub mod messages;
pub use messages::{
    ApiMessage, MessagesRequest, Role, UpstreamResponse, error_message, forward, response_text,
};
