//! Per-state configuration.

use crate::builder::{insert_by_priority, Transition};
use crate::config::error::ConfigurationError;
use crate::core::{State, Trigger};
use crate::effects::flavor::Flavor;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Which lifecycle callback of a state to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Callback {
    /// Leaving the state for one outside its subtree
    Exit,
    /// Arriving from outside the state's subtree
    Entry,
    /// A transition that ends where it started
    Reentry,
}

/// Everything configured for one state.
pub struct StateConfiguration<S, G, F: Flavor> {
    state: S,
    pub(crate) superstate: Option<S>,
    transitions: HashMap<G, Vec<Transition<S, F::Condition>>>,
    auto_forwards: HashMap<G, Transition<S, F::Condition>>,
    trigger_actions: HashMap<G, Vec<F::TriggerAction>>,
    entry: Option<F::Action>,
    exit: Option<F::Action>,
    reentry: Option<F::Action>,
}

impl<S: State, G: Trigger, F: Flavor> StateConfiguration<S, G, F> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            superstate: None,
            transitions: HashMap::new(),
            auto_forwards: HashMap::new(),
            trigger_actions: HashMap::new(),
            entry: None,
            exit: None,
            reentry: None,
        }
    }

    /// The configured state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The containing state, if any.
    pub fn superstate(&self) -> Option<&S> {
        self.superstate.as_ref()
    }

    /// Triggers with at least one transition registered on this state.
    pub fn triggers(&self) -> impl Iterator<Item = &G> {
        self.transitions.keys()
    }

    /// Transitions for `trigger`, in resolution order.
    pub fn transitions(&self, trigger: &G) -> &[Transition<S, F::Condition>] {
        self.transitions
            .get(trigger)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The auto-forward transition keyed by `trigger`, if any.
    pub fn auto_forward(&self, trigger: &G) -> Option<&Transition<S, F::Condition>> {
        self.auto_forwards.get(trigger)
    }

    pub(crate) fn has_transitions(&self, trigger: &G) -> bool {
        self.transitions.contains_key(trigger)
    }

    pub(crate) fn trigger_actions(&self, trigger: &G) -> &[F::TriggerAction] {
        self.trigger_actions
            .get(trigger)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn callback(&self, kind: Callback) -> Option<&F::Action> {
        match kind {
            Callback::Exit => self.exit.as_ref(),
            Callback::Entry => self.entry.as_ref(),
            Callback::Reentry => self.reentry.as_ref(),
        }
    }

    pub(crate) fn set_callback(&mut self, kind: Callback, action: F::Action) {
        let slot = match kind {
            Callback::Exit => &mut self.exit,
            Callback::Entry => &mut self.entry,
            Callback::Reentry => &mut self.reentry,
        };
        *slot = Some(action);
    }

    pub(crate) fn add_transition(&mut self, trigger: G, mut transition: Transition<S, F::Condition>) {
        transition.name_from(&self.state);
        insert_by_priority(self.transitions.entry(trigger).or_default(), transition);
    }

    pub(crate) fn add_auto_forward(
        &mut self,
        trigger: G,
        mut transition: Transition<S, F::Condition>,
    ) -> Result<(), ConfigurationError> {
        transition.name_from(&self.state);
        match self.auto_forwards.entry(trigger) {
            Entry::Occupied(existing) => Err(ConfigurationError::DuplicateAutoForward {
                state: format!("{:?}", self.state),
                trigger: format!("{:?}", existing.key()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(transition);
                Ok(())
            }
        }
    }

    pub(crate) fn add_trigger_action(&mut self, trigger: G, action: F::TriggerAction) {
        self.trigger_actions.entry(trigger).or_default().push(action);
    }
}
