//! Conversation session.
//!
//! A `Session` owns the conversation context, the tool registry and the
//! token tracker, and drives one turn at a time against a completion
//! client. Methods take `&mut self`, so turns on one session are
//! serialized by construction.

mod chat;
mod manager;


pub use manager::Session;
