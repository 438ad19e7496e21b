//! Synchronous state machine.

use crate::core::{ExecutionParameters, State, StateTransitionResult, Trigger};
use crate::effects::engine::Engine;
use crate::effects::error::MachineError;
use crate::effects::flavor::Blocking;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Synchronous state machine over externally owned contexts.
///
/// Conditions and actions run to completion on the caller's thread. Calls
/// against the same context must be serialized by the caller. Any
/// cancellation signal in the parameters is ignored.
///
/// # Example
///
/// ```rust
/// use statekeeper::builder::Transition;
/// use statekeeper::effects::StateMachine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// struct Room {
///     door: Door,
/// }
///
/// let mut machine: StateMachine<Room, Door, &str> =
///     StateMachine::new(|room: &Room| room.door, |room: &mut Room, door| room.door = door);
/// machine
///     .configure_state(Door::Open)
///     .permit("close", Transition::to(Door::Closed));
///
/// let mut room = Room { door: Door::Open };
/// let result = machine.fire_trigger(&mut room, "close").unwrap();
///
/// assert!(result.was_transitioned);
/// assert_eq!(room.door, Door::Closed);
/// assert_eq!(result.last_transition_name.as_deref(), Some("Open2Closed"));
/// ```
pub type StateMachine<T, S, G, R = ()> = Engine<T, S, G, Blocking<T, R>>;

impl<T: 'static, S: State, G: Trigger, R: 'static> Engine<T, S, G, Blocking<T, R>> {
    /// Triggers that would currently select a transition, inherited ones included.
    pub fn permitted_triggers(&self, context: &T) -> HashSet<G> {
        let mut permitted = HashSet::new();
        for (trigger, transitions) in self.visible_transitions(context) {
            if permitted.contains(trigger) {
                continue;
            }
            let open = transitions.iter().any(|transition| {
                transition
                    .condition
                    .as_ref()
                    .map_or(true, |guard| guard.check(context))
            });
            if open {
                permitted.insert(trigger.clone());
            }
        }
        permitted
    }

    /// Fire `trigger` without a request payload.
    pub fn fire_trigger(
        &self,
        context: &mut T,
        trigger: G,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        self.execute(ExecutionParameters::new(trigger, context))
    }

    /// Fire `trigger` with a request payload for its trigger actions.
    pub fn fire_trigger_with(
        &self,
        context: &mut T,
        trigger: G,
        request: &R,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        self.execute(ExecutionParameters::new(trigger, context).with_request(request))
    }

    /// Resolve and apply one trigger firing.
    ///
    /// Order: global action, state-scoped actions and resolution along the
    /// lineage, mutation, exit/entry/reentry, auto-forward hops, then the
    /// result-level notifications.
    pub fn execute(
        &self,
        mut params: ExecutionParameters<'_, T, G, R>,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        let start = self.current_state(params.context);
        debug!(trigger = ?params.trigger, state = ?start, "firing trigger");

        if let Some(action) = self.global_action(&params.trigger) {
            trace!(trigger = ?params.trigger, "running global trigger action");
            action.invoke(&params.trigger, params.context, params.request)?;
        }

        let mut result = StateTransitionResult::unresolved(params.trigger.clone(), start);
        if self.resolve(&mut params, &mut result)? {
            self.settle(&mut params, &mut result)?;
        }

        self.finish(&result);
        Ok(result)
    }

    /// Walk the lineage and commit the first matching transition.
    fn resolve(
        &self,
        params: &mut ExecutionParameters<'_, T, G, R>,
        result: &mut StateTransitionResult<S, G>,
    ) -> Result<bool, MachineError> {
        let start = result.starting_state.clone();
        for config in self.lineage(&start) {
            for action in config.trigger_actions(&params.trigger) {
                trace!(state = ?config.state(), trigger = ?params.trigger, "running state trigger action");
                action.invoke(&params.trigger, params.context, params.request)?;
            }

            for transition in self.candidates(config, result) {
                let matched = transition
                    .condition
                    .as_ref()
                    .map_or(true, |guard| guard.check(params.context));
                trace!(name = transition.label(), matched, "condition evaluated");
                if matched {
                    self.commit(params.context, result, transition);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn settle(
        &self,
        params: &mut ExecutionParameters<'_, T, G, R>,
        result: &mut StateTransitionResult<S, G>,
    ) -> Result<(), MachineError> {
        let mut taken = 0;
        loop {
            let plan = self.plan(result);
            for step in &plan.steps {
                if let Some(action) = self.callback(step) {
                    trace!(kind = ?step.0, state = ?step.1, "running state callback");
                    action(&mut *params.context).map_err(MachineError::Action)?;
                }
            }
            self.announce(result, taken > 0);

            let Some(auto) = self.next_auto_forward(result, &plan, taken) else {
                return Ok(());
            };
            let matched = auto
                .condition
                .as_ref()
                .map_or(true, |guard| guard.check(params.context));
            if !matched {
                return Ok(());
            }
            self.forward(params.context, result, auto);
            taken += 1;
        }
    }
}
