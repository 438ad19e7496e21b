//! Errors raised while configuring a machine.

use thiserror::Error;

/// Errors that can occur during the configuration phase.
///
/// The offending registration is rejected and the registry keeps whatever it
/// held before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("A global action is already registered for trigger '{trigger}'")]
    DuplicateTriggerAction { trigger: String },

    #[error("State '{state}' already has an auto-forward transition for trigger '{trigger}'")]
    DuplicateAutoForward { state: String, trigger: String },

    #[error("Making '{superstate}' the superstate of '{state}' would create a cycle")]
    SuperstateCycle { state: String, superstate: String },
}
