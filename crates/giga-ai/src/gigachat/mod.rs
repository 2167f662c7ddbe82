//! GigaChat chat-completion transport.
//!
//! Implements `CompletionClient` over the GigaChat REST API
//! (`POST /api/v1/chat/completions`) with bearer tokens from a
//! `TokenProvider`.

mod api;
mod client;
mod config;

pub use client::GigaChatClient;
pub use config::GigaChatConfig;
