//! Core value types of the engine.
//!
//! This module contains the pieces that carry no behavior of their own:
//! - State and trigger identities via the `State` and `Trigger` traits
//! - Guard predicates evaluated against a context
//! - Per-call execution parameters
//! - The transition result and per-hop notification records

mod event;
mod guard;
mod params;
mod result;
mod state;

pub use event::TransitionEvent;
pub use guard::{AsyncGuard, Guard};
pub use params::ExecutionParameters;
pub use result::StateTransitionResult;
pub use state::{State, Trigger};
