//! Notification payload for a single state change.

use super::result::StateTransitionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed hop, handed to `on_transitioned` subscribers.
///
/// A firing that cascades through auto-forward transitions produces one
/// event per hop, in order.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::TransitionEvent;
/// use chrono::Utc;
///
/// let event = TransitionEvent {
///     trigger: "pay",
///     from: "Open",
///     to: "Complete",
///     transition_name: "Open2Complete".to_string(),
///     automatic: false,
///     timestamp: Utc::now(),
/// };
///
/// assert!(!event.is_reentry());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionEvent<S, G> {
    /// Trigger that started the firing
    pub trigger: G,
    /// State that was left
    pub from: S,
    /// State that was entered
    pub to: S,
    /// Name of the applied transition
    pub transition_name: String,
    /// Whether the hop came from an auto-forward transition
    pub automatic: bool,
    /// When the hop was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: Clone + PartialEq, G: Clone> TransitionEvent<S, G> {
    pub(crate) fn from_result(result: &StateTransitionResult<S, G>, automatic: bool) -> Self {
        Self {
            trigger: result.trigger.clone(),
            from: result.previous_state.clone(),
            to: result.current_state.clone(),
            transition_name: result.last_transition_name.clone().unwrap_or_default(),
            automatic,
            timestamp: Utc::now(),
        }
    }

    /// Whether the hop ended in the state it left.
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}
