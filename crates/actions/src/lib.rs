//! Host-level action execution with a best-effort safety policy.
//!
//! Every handler converts its own failures into a human-readable result
//! string; nothing in this crate aborts the conversation that asked for
//! the action.

pub mod apps;
pub mod error;
pub mod executor;
pub mod guard;
pub mod host;
pub mod search;

pub use error::ActionError;
pub use executor::ActionExecutor;
pub use guard::CommandGuard;
