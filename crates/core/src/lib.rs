//! Per-turn orchestration: local intent detection, the streaming reply,
//! and the arbitration rule that keeps one user turn from firing an
//! action twice.

pub mod coordinator;
pub mod markers;

pub use coordinator::{ActionRunner, Coordinator, TurnEvent, TurnResult};
pub use markers::{arbitrate, parse_markers, strip_markers};
