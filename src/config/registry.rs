//! State registry and hierarchy walks.
//!
//! Superstates are stored as parent keys, forming a parent-pointer tree.
//! Cycles are rejected when a link is made, and every walk is additionally
//! bounded by the number of configured states.

use crate::config::configuration::{Callback, StateConfiguration};
use crate::config::error::ConfigurationError;
use crate::core::{State, Trigger};
use crate::effects::flavor::Flavor;
use std::collections::HashMap;
use std::iter;

pub(crate) struct Registry<S, G, F: Flavor> {
    states: HashMap<S, StateConfiguration<S, G, F>>,
}

impl<S: State, G: Trigger, F: Flavor> Registry<S, G, F> {
    pub(crate) fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, state: &S) -> Option<&StateConfiguration<S, G, F>> {
        self.states.get(state)
    }

    pub(crate) fn get_or_insert(&mut self, state: S) -> &mut StateConfiguration<S, G, F> {
        self.states
            .entry(state.clone())
            .or_insert_with(|| StateConfiguration::new(state))
    }

    pub(crate) fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    /// Superstates of `state`, nearest first.
    pub(crate) fn ancestors<'r>(&'r self, state: &S) -> impl Iterator<Item = &'r S> + 'r {
        let mut next = self.parent(state);
        iter::from_fn(move || {
            let current = next?;
            next = self.parent(current);
            Some(current)
        })
        .take(self.states.len())
    }

    /// The configuration of `state` followed by those of its superstates.
    pub(crate) fn lineage<'r>(
        &'r self,
        state: &S,
    ) -> impl Iterator<Item = &'r StateConfiguration<S, G, F>> + 'r {
        self.states
            .get(state)
            .into_iter()
            .chain(self.ancestors(state).filter_map(|ancestor| self.states.get(ancestor)))
    }

    /// Whether `ancestor` is a strict superstate of `state`.
    pub(crate) fn is_descendant(&self, state: &S, ancestor: &S) -> bool {
        self.ancestors(state).any(|candidate| candidate == ancestor)
    }

    /// Whether `state` is `queried` or lies inside it.
    pub(crate) fn is_in_state(&self, state: &S, queried: &S) -> bool {
        state == queried || self.is_descendant(state, queried)
    }

    pub(crate) fn set_superstate(&mut self, state: &S, superstate: S) -> Result<(), ConfigurationError> {
        if superstate == *state || self.is_descendant(&superstate, state) {
            return Err(ConfigurationError::SuperstateCycle {
                state: format!("{state:?}"),
                superstate: format!("{superstate:?}"),
            });
        }
        self.get_or_insert(superstate.clone());
        self.get_or_insert(state.clone()).superstate = Some(superstate);
        Ok(())
    }

    pub(crate) fn callback(&self, kind: Callback, state: &S) -> Option<&F::Action> {
        self.states.get(state).and_then(|config| config.callback(kind))
    }

    fn parent(&self, state: &S) -> Option<&S> {
        self.states.get(state).and_then(|config| config.superstate.as_ref())
    }
}
