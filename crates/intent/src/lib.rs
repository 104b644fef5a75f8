//! Local intent detection - turns raw user text into structured actions
//! without waiting on the LLM backend.

pub mod action;
pub mod detector;
pub mod tables;

pub use action::{Action, ActionKind};
pub use detector::IntentDetector;
