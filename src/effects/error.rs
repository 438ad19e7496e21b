//! Errors raised while firing a trigger.

use thiserror::Error;

/// Error type returned by embedder-supplied actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while firing a trigger.
///
/// "No transition found" is not an error; it is reported through the
/// flags of [`StateTransitionResult`](crate::core::StateTransitionResult).
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Trigger '{trigger}' requires a request payload of type {expected}")]
    TypeMismatch {
        trigger: String,
        expected: &'static str,
    },

    #[error("Action failed: {0}")]
    Action(#[source] ActionError),
}
