//! Execution engines.
//!
//! Both machines are an [`Engine`] and share its registry, lineage walk
//! and hop planner.
//! [`StateMachine`] runs callbacks to completion; [`AsyncStateMachine`]
//! awaits them and honors a cancellation token between steps.
//!
//! # Key Concepts
//!
//! - **Resolution**: walk the current state and its superstates, first matching transition wins
//! - **Hops**: each committed state change runs exit, entry or reentry callbacks
//! - **Auto-forward**: a state entered by a trigger may forward itself along the same trigger

pub(crate) mod action;
mod async_machine;
mod engine;
pub(crate) mod error;
pub(crate) mod flavor;
mod hooks;
mod machine;
mod plan;

pub use action::{Action, ActionResult, AsyncAction, AsyncTriggerAction, TriggerAction};
pub use async_machine::AsyncStateMachine;
pub use engine::Engine;
pub use error::{ActionError, MachineError};
pub use flavor::{Blocking, Flavor, Suspending};
pub use machine::StateMachine;
