//! The two line state machines
//!
//! Both are pure step functions `(state, line) -> Transition`; neither
//! writes anywhere. The orchestrator in [`crate::transformer`] folds their
//! actions into one output stream.

pub mod disable;
pub mod inject;

pub use disable::{DisableEvent, DisableSpan, DisableState};
pub use inject::{FifoNode, InjectEvent, InjectState};
