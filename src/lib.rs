pub mod anthropic;
pub mod api;
pub mod chat;
pub mod cli;
pub mod core;
pub mod framework;
pub mod marker;
pub mod prompt;
pub mod render;
