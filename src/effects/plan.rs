//! Decisions shared by both execution paths.
//!
//! The planner decides which lifecycle callbacks a hop runs; the machines
//! only differ in how they invoke them.

use crate::config::registry::Registry;
use crate::config::Callback;
use crate::core::{State, Trigger};
use crate::effects::flavor::Flavor;
use std::cmp::Ordering;

/// Callbacks to run for one committed hop, in order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HopPlan<S> {
    pub(crate) steps: Vec<(Callback, S)>,
    pub(crate) changed: bool,
}

/// Plan the callbacks for a hop from `from` to `to`.
///
/// Moving deeper into a superstate does not exit it, and returning to a
/// superstate from inside it does not enter it again.
pub(crate) fn plan_hop<S: State, G: Trigger, F: Flavor>(
    registry: &Registry<S, G, F>,
    from: &S,
    to: &S,
) -> HopPlan<S> {
    if from.cmp(to) == Ordering::Equal {
        return HopPlan {
            steps: vec![(Callback::Reentry, to.clone())],
            changed: false,
        };
    }

    let mut steps = Vec::with_capacity(2);
    if !registry.is_descendant(to, from) {
        steps.push((Callback::Exit, from.clone()));
    }
    if !registry.is_descendant(from, to) {
        steps.push((Callback::Entry, to.clone()));
    }
    HopPlan {
        steps,
        changed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::flavor::Blocking;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    enum Mode {
        Active,
        Running,
        Paused,
        Stopped,
    }

    fn registry() -> Registry<Mode, &'static str, Blocking<(), ()>> {
        let mut registry = Registry::new();
        registry.set_superstate(&Mode::Running, Mode::Active).unwrap();
        registry.set_superstate(&Mode::Paused, Mode::Active).unwrap();
        registry
    }

    #[test]
    fn same_state_reenters() {
        let plan = plan_hop(&registry(), &Mode::Running, &Mode::Running);

        assert_eq!(plan.steps, vec![(Callback::Reentry, Mode::Running)]);
        assert!(!plan.changed);
    }

    #[test]
    fn unrelated_states_exit_then_enter() {
        let plan = plan_hop(&registry(), &Mode::Running, &Mode::Stopped);

        assert_eq!(
            plan.steps,
            vec![(Callback::Exit, Mode::Running), (Callback::Entry, Mode::Stopped)]
        );
        assert!(plan.changed);
    }

    #[test]
    fn entering_substate_keeps_superstate() {
        let plan = plan_hop(&registry(), &Mode::Active, &Mode::Running);

        assert_eq!(plan.steps, vec![(Callback::Entry, Mode::Running)]);
    }

    #[test]
    fn returning_to_superstate_skips_entry() {
        let plan = plan_hop(&registry(), &Mode::Paused, &Mode::Active);

        assert_eq!(plan.steps, vec![(Callback::Exit, Mode::Paused)]);
    }

    #[test]
    fn sibling_substates_exit_and_enter() {
        let plan = plan_hop(&registry(), &Mode::Running, &Mode::Paused);

        assert_eq!(
            plan.steps,
            vec![(Callback::Exit, Mode::Running), (Callback::Entry, Mode::Paused)]
        );
    }
}
