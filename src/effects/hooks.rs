//! Per-machine notification subscribers.

use crate::core::{StateTransitionResult, TransitionEvent};

type TransitionHook<S, G> = Box<dyn Fn(&TransitionEvent<S, G>) + Send + Sync>;
type ResultHook<S, G> = Box<dyn Fn(&StateTransitionResult<S, G>) + Send + Sync>;

/// Subscribers owned by one machine instance.
pub(crate) struct Hooks<S, G> {
    transitioned: Vec<TransitionHook<S, G>>,
    no_transition: Vec<ResultHook<S, G>>,
    not_configured: Vec<ResultHook<S, G>>,
}

impl<S, G> Hooks<S, G> {
    pub(crate) fn new() -> Self {
        Self {
            transitioned: Vec::new(),
            no_transition: Vec::new(),
            not_configured: Vec::new(),
        }
    }

    pub(crate) fn subscribe_transitioned(&mut self, hook: TransitionHook<S, G>) {
        self.transitioned.push(hook);
    }

    pub(crate) fn subscribe_no_transition(&mut self, hook: ResultHook<S, G>) {
        self.no_transition.push(hook);
    }

    pub(crate) fn subscribe_not_configured(&mut self, hook: ResultHook<S, G>) {
        self.not_configured.push(hook);
    }

    pub(crate) fn transitioned(&self, event: &TransitionEvent<S, G>) {
        for hook in &self.transitioned {
            hook(event);
        }
    }

    /// Raise the result-level notifications at the end of a firing.
    pub(crate) fn finished(&self, result: &StateTransitionResult<S, G>) {
        if !result.transition_defined {
            for hook in &self.not_configured {
                hook(result);
            }
        }
        if !result.was_transitioned {
            for hook in &self.no_transition {
                hook(result);
            }
        }
    }
}
