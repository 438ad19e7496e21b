//! Outcome of a trigger firing.

use serde::{Deserialize, Serialize};

/// Record describing what a single `fire_trigger` call did.
///
/// A fresh result is created per call. While auto-forward transitions
/// cascade, `previous_state`, `current_state` and `last_transition_name`
/// follow each hop, and `starting_state` keeps the state the call began in.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::StateTransitionResult;
///
/// let result = StateTransitionResult::unresolved("pay", "Open");
///
/// assert!(!result.transition_defined);
/// assert!(!result.was_transitioned);
/// assert_eq!(result.starting_state, "Open");
/// assert_eq!(result.current_state, "Open");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransitionResult<S, G> {
    /// Trigger that was fired
    pub trigger: G,
    /// State the context was in when the call started
    pub starting_state: S,
    /// State left by the most recent hop
    pub previous_state: S,
    /// State the context is in now
    pub current_state: S,
    /// Name of the most recently applied transition
    pub last_transition_name: Option<String>,
    /// Whether any transition was configured for the trigger
    pub transition_defined: bool,
    /// Whether the context's state was written
    pub was_transitioned: bool,
    /// Whether the applied transition had a condition that evaluated true
    pub condition_matched: bool,
    /// Whether the call stopped because cancellation was requested
    pub was_cancelled: bool,
}

impl<S: Clone, G> StateTransitionResult<S, G> {
    /// A result in which nothing happened.
    pub fn unresolved(trigger: G, state: S) -> Self {
        Self {
            trigger,
            starting_state: state.clone(),
            previous_state: state.clone(),
            current_state: state,
            last_transition_name: None,
            transition_defined: false,
            was_transitioned: false,
            condition_matched: false,
            was_cancelled: false,
        }
    }

    /// Record the transition selected by resolution.
    pub(crate) fn select(&mut self, to: S, name: &str, guarded: bool) {
        self.previous_state = self.starting_state.clone();
        self.current_state = to;
        self.last_transition_name = Some(name.to_string());
        self.transition_defined = true;
        self.was_transitioned = true;
        self.condition_matched = guarded;
    }

    /// Merge an auto-forward hop into the running result.
    pub(crate) fn advance(&mut self, to: S, name: &str) {
        let from = std::mem::replace(&mut self.current_state, to);
        self.previous_state = from;
        self.last_transition_name = Some(name.to_string());
    }
}

impl<S, G> StateTransitionResult<S, G> {
    pub(crate) fn cancel(&mut self) {
        self.was_cancelled = true;
    }
}
