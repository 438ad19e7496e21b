//! Asynchronous state machine with cooperative cancellation.

use crate::core::{ExecutionParameters, State, StateTransitionResult, Trigger};
use crate::effects::engine::Engine;
use crate::effects::error::MachineError;
use crate::effects::flavor::Suspending;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Stop the call if cancellation was requested.
fn halted<T, G, R, S>(
    params: &ExecutionParameters<'_, T, G, R>,
    result: &mut StateTransitionResult<S, G>,
) -> bool {
    if params.is_cancelled() {
        result.cancel();
        true
    } else {
        false
    }
}

/// State machine whose conditions and actions return futures.
///
/// Behaves like [`StateMachine`](crate::effects::StateMachine) hop for hop.
/// When the parameters carry a cancellation token it is polled before every
/// condition, every action, every superstate step and every auto-forward hop.
/// Once cancellation is seen the call returns with `was_cancelled` set, the
/// pending hop is not applied and no further notifications are raised. Hops
/// already applied through the mutator stay applied.
///
/// # Example
///
/// ```rust
/// use statekeeper::builder::Transition;
/// use statekeeper::effects::AsyncStateMachine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// enum Upload {
///     Pending,
///     Sent,
/// }
///
/// struct File {
///     upload: Upload,
///     bytes: usize,
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut machine: AsyncStateMachine<File, Upload, &str> =
///     AsyncStateMachine::new(|file: &File| file.upload, |file: &mut File, upload| file.upload = upload);
/// machine
///     .configure_state(Upload::Pending)
///     .permit(
///         "send",
///         Transition::to(Upload::Sent).when_async(|file: &File| {
///             let ready = file.bytes > 0;
///             Box::pin(async move { ready })
///         }),
///     );
///
/// let mut file = File { upload: Upload::Pending, bytes: 64 };
/// let result = machine.fire_trigger(&mut file, "send").await.unwrap();
///
/// assert!(result.was_transitioned);
/// assert_eq!(file.upload, Upload::Sent);
/// # }
/// ```
pub type AsyncStateMachine<T, S, G, R = ()> = Engine<T, S, G, Suspending<T, R>>;

impl<T, S, G, R> Engine<T, S, G, Suspending<T, R>>
where
    T: Send + Sync + 'static,
    S: State,
    G: Trigger,
    R: Sync + 'static,
{
    /// Triggers that would currently select a transition, inherited ones included.
    pub async fn permitted_triggers(&self, context: &T) -> HashSet<G> {
        let mut permitted = HashSet::new();
        for (trigger, transitions) in self.visible_transitions(context) {
            if permitted.contains(trigger) {
                continue;
            }
            for transition in transitions {
                let open = match &transition.condition {
                    Some(guard) => guard.check(context).await,
                    None => true,
                };
                if open {
                    permitted.insert(trigger.clone());
                    break;
                }
            }
        }
        permitted
    }

    /// Fire `trigger` without a request payload or cancellation token.
    pub async fn fire_trigger(
        &self,
        context: &mut T,
        trigger: G,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        self.execute(ExecutionParameters::new(trigger, context)).await
    }

    /// Fire `trigger` with a request payload for its trigger actions.
    pub async fn fire_trigger_with(
        &self,
        context: &mut T,
        trigger: G,
        request: &R,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        self.execute(ExecutionParameters::new(trigger, context).with_request(request))
            .await
    }

    /// Resolve and apply one trigger firing, honoring the cancellation token.
    pub async fn execute(
        &self,
        mut params: ExecutionParameters<'_, T, G, R>,
    ) -> Result<StateTransitionResult<S, G>, MachineError> {
        let start = self.current_state(params.context);
        debug!(trigger = ?params.trigger, state = ?start, "firing trigger");
        let mut result = StateTransitionResult::unresolved(params.trigger.clone(), start);

        if let Some(action) = self.global_action(&params.trigger) {
            if halted(&params, &mut result) {
                debug!(trigger = ?params.trigger, "cancelled before global trigger action");
                return Ok(result);
            }
            trace!(trigger = ?params.trigger, "running global trigger action");
            action
                .invoke(&params.trigger, params.context, params.request)
                .await?;
        }

        if self.resolve(&mut params, &mut result).await? {
            self.settle(&mut params, &mut result).await?;
        }
        if result.was_cancelled {
            debug!(state = ?result.current_state, "cancelled");
            return Ok(result);
        }

        self.finish(&result);
        Ok(result)
    }

    /// Walk the lineage and commit the first matching transition.
    async fn resolve(
        &self,
        params: &mut ExecutionParameters<'_, T, G, R>,
        result: &mut StateTransitionResult<S, G>,
    ) -> Result<bool, MachineError> {
        let start = result.starting_state.clone();
        for config in self.lineage(&start) {
            if halted(params, result) {
                return Ok(false);
            }
            for action in config.trigger_actions(&params.trigger) {
                if halted(params, result) {
                    return Ok(false);
                }
                trace!(state = ?config.state(), trigger = ?params.trigger, "running state trigger action");
                action
                    .invoke(&params.trigger, params.context, params.request)
                    .await?;
            }

            for transition in self.candidates(config, result) {
                let matched = match &transition.condition {
                    Some(guard) => {
                        if halted(params, result) {
                            return Ok(false);
                        }
                        let matched = guard.check(params.context).await;
                        if halted(params, result) {
                            return Ok(false);
                        }
                        matched
                    }
                    None => true,
                };
                trace!(name = transition.label(), matched, "condition evaluated");
                if matched {
                    self.commit(params.context, result, transition);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    async fn settle(
        &self,
        params: &mut ExecutionParameters<'_, T, G, R>,
        result: &mut StateTransitionResult<S, G>,
    ) -> Result<(), MachineError> {
        let mut taken = 0;
        loop {
            let plan = self.plan(result);
            for step in &plan.steps {
                if let Some(action) = self.callback(step) {
                    if halted(params, result) {
                        return Ok(());
                    }
                    trace!(kind = ?step.0, state = ?step.1, "running state callback");
                    action(&mut *params.context)
                        .await
                        .map_err(MachineError::Action)?;
                }
            }
            self.announce(result, taken > 0);

            let Some(auto) = self.next_auto_forward(result, &plan, taken) else {
                return Ok(());
            };
            if halted(params, result) {
                return Ok(());
            }
            let matched = match &auto.condition {
                Some(guard) => {
                    let matched = guard.check(params.context).await;
                    if halted(params, result) {
                        return Ok(());
                    }
                    matched
                }
                None => true,
            };
            if !matched {
                return Ok(());
            }
            self.forward(params.context, result, auto);
            taken += 1;
        }
    }
}
