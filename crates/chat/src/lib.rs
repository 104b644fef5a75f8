//! Streaming chat against a local Ollama backend: conversation state, the
//! incremental token stream, cancellation, and backend health handling.

pub mod client;
pub mod conversation;
pub mod error;
pub mod manager;
pub mod prompt;

pub use client::{CancelFlag, ChatClient, ChatOutcome};
pub use conversation::{ChatMessage, Conversation, Role};
pub use error::ChatError;
pub use manager::BackendManager;
pub use prompt::GREETING;
