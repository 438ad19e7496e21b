//! Machine state and behavior shared by both execution flavors.
//!
//! [`Engine`] owns the accessor, the mutator, the configuration registry,
//! the global trigger actions and the subscribers. Everything that does not
//! invoke an embedder callback lives here; the flavor-specific `execute`
//! paths only decide how conditions and actions are called.

use crate::builder::{StateConfigurator, Transition};
use crate::config::registry::Registry;
use crate::config::{Callback, ConfigurationError, StateConfiguration};
use crate::core::{State, StateTransitionResult, TransitionEvent, Trigger};
use crate::effects::flavor::Flavor;
use crate::effects::hooks::Hooks;
use crate::effects::plan::{plan_hop, HopPlan};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

type Accessor<T, S> = Box<dyn Fn(&T) -> S + Send + Sync>;
type Mutator<T, S> = Box<dyn Fn(&mut T, S) + Send + Sync>;

/// A configured machine, generic over its execution [`Flavor`].
///
/// Use it through [`StateMachine`](crate::effects::StateMachine) or
/// [`AsyncStateMachine`](crate::effects::AsyncStateMachine). The machine holds
/// configuration only. Each call receives the context whose state it reads
/// and writes, so one machine can drive any number of contexts.
pub struct Engine<T: 'static, S: State, G: Trigger, F: Flavor> {
    accessor: Accessor<T, S>,
    mutator: Mutator<T, S>,
    trigger_actions: HashMap<G, F::TriggerAction>,
    registry: Registry<S, G, F>,
    hooks: Hooks<S, G>,
}

impl<T: 'static, S: State, G: Trigger, F: Flavor> Engine<T, S, G, F> {
    /// Create a machine that reads state with `accessor` and writes it with `mutator`.
    pub fn new<A, M>(accessor: A, mutator: M) -> Self
    where
        A: Fn(&T) -> S + Send + Sync + 'static,
        M: Fn(&mut T, S) + Send + Sync + 'static,
    {
        Self {
            accessor: Box::new(accessor),
            mutator: Box::new(mutator),
            trigger_actions: HashMap::new(),
            registry: Registry::new(),
            hooks: Hooks::new(),
        }
    }

    /// Configure `state`, creating its configuration on first use.
    pub fn configure_state(&mut self, state: S) -> StateConfigurator<'_, S, G, F> {
        StateConfigurator::new(&mut self.registry, state)
    }

    /// Register the machine-wide action for `trigger`.
    ///
    /// It runs on every firing of `trigger`, whatever the current state. A
    /// second registration for the same trigger is rejected and the first
    /// one is kept.
    pub fn add_trigger_action(
        &mut self,
        trigger: G,
        action: F::TriggerAction,
    ) -> Result<(), ConfigurationError> {
        match self.trigger_actions.entry(trigger) {
            Entry::Occupied(existing) => Err(ConfigurationError::DuplicateTriggerAction {
                trigger: format!("{:?}", existing.key()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(action);
                Ok(())
            }
        }
    }

    /// Subscribe to every committed hop of this machine.
    pub fn on_transitioned<H>(&mut self, hook: H)
    where
        H: Fn(&TransitionEvent<S, G>) + Send + Sync + 'static,
    {
        self.hooks.subscribe_transitioned(Box::new(hook));
    }

    /// Subscribe to firings that leave the state untouched.
    pub fn on_no_transition<H>(&mut self, hook: H)
    where
        H: Fn(&StateTransitionResult<S, G>) + Send + Sync + 'static,
    {
        self.hooks.subscribe_no_transition(Box::new(hook));
    }

    /// Subscribe to firings of triggers with no transition in the lineage.
    pub fn on_trigger_not_configured<H>(&mut self, hook: H)
    where
        H: Fn(&StateTransitionResult<S, G>) + Send + Sync + 'static,
    {
        self.hooks.subscribe_not_configured(Box::new(hook));
    }

    /// The configuration of `state`, if any.
    pub fn configuration(&self, state: &S) -> Option<&StateConfiguration<S, G, F>> {
        self.registry.get(state)
    }

    /// All configured states, in no particular order.
    pub fn configured_states(&self) -> impl Iterator<Item = &S> {
        self.registry.states()
    }

    /// The direct superstate of `state`, if any.
    pub fn superstate_of(&self, state: &S) -> Option<&S> {
        self.registry.get(state).and_then(StateConfiguration::superstate)
    }

    /// The context's literal state.
    pub fn current_state(&self, context: &T) -> S {
        (self.accessor)(context)
    }

    /// Whether the context is in `state` or in one of its substates.
    pub fn is_in_state(&self, context: &T, state: &S) -> bool {
        self.registry.is_in_state(&(self.accessor)(context), state)
    }

    /// Triggers with transitions on the context's literal state.
    ///
    /// Conditions are not evaluated and superstates are not consulted.
    pub fn available_triggers(&self, context: &T) -> HashSet<G> {
        let state = (self.accessor)(context);
        self.registry
            .get(&state)
            .map(|config| config.triggers().cloned().collect())
            .unwrap_or_default()
    }

    /// Every (trigger, transitions) pair visible from the context's state,
    /// nearest configuration first.
    pub(crate) fn visible_transitions<'e>(
        &'e self,
        context: &T,
    ) -> Vec<(&'e G, &'e [Transition<S, F::Condition>])> {
        let state = (self.accessor)(context);
        self.registry
            .lineage(&state)
            .flat_map(|config| {
                config
                    .triggers()
                    .map(move |trigger| (trigger, config.transitions(trigger)))
            })
            .collect()
    }

    pub(crate) fn global_action(&self, trigger: &G) -> Option<&F::TriggerAction> {
        self.trigger_actions.get(trigger)
    }

    /// Configurations consulted when resolving from `state`, nearest first.
    pub(crate) fn lineage<'e>(
        &'e self,
        state: &S,
    ) -> impl Iterator<Item = &'e StateConfiguration<S, G, F>> + 'e {
        self.registry.lineage(state)
    }

    /// Candidate transitions of one lineage level, in resolution order.
    ///
    /// Marks the result as defined when the level has any.
    pub(crate) fn candidates<'e>(
        &self,
        config: &'e StateConfiguration<S, G, F>,
        result: &mut StateTransitionResult<S, G>,
    ) -> &'e [Transition<S, F::Condition>] {
        if config.has_transitions(&result.trigger) {
            result.transition_defined = true;
        }
        config.transitions(&result.trigger)
    }

    /// Record the selected transition and write the new state.
    pub(crate) fn commit(
        &self,
        context: &mut T,
        result: &mut StateTransitionResult<S, G>,
        transition: &Transition<S, F::Condition>,
    ) {
        result.select(
            transition.to.clone(),
            transition.label(),
            transition.is_conditional(),
        );
        debug!(
            from = ?result.previous_state,
            to = ?result.current_state,
            name = ?result.last_transition_name,
            "transition selected"
        );
        (self.mutator)(context, result.current_state.clone());
    }

    /// Callbacks to run for the hop the result currently describes.
    pub(crate) fn plan(&self, result: &StateTransitionResult<S, G>) -> HopPlan<S> {
        plan_hop(&self.registry, &result.previous_state, &result.current_state)
    }

    pub(crate) fn callback(&self, step: &(Callback, S)) -> Option<&F::Action> {
        self.registry.callback(step.0, &step.1)
    }

    pub(crate) fn announce(&self, result: &StateTransitionResult<S, G>, automatic: bool) {
        self.hooks
            .transitioned(&TransitionEvent::from_result(result, automatic));
    }

    /// The auto-forward transition to try after a hop into the current state.
    ///
    /// `taken` counts the auto-forward hops already applied in this call.
    /// Cascades stop once they have taken as many hops as there are
    /// configured states, since a longer cascade must be cycling.
    pub(crate) fn next_auto_forward(
        &self,
        result: &StateTransitionResult<S, G>,
        plan: &HopPlan<S>,
        taken: usize,
    ) -> Option<&Transition<S, F::Condition>> {
        if !plan.changed {
            return None;
        }
        let auto = self
            .registry
            .get(&result.current_state)
            .and_then(|config| config.auto_forward(&result.trigger))?;
        let limit = self.registry.states().count();
        if taken >= limit {
            warn!(
                state = ?result.current_state,
                trigger = ?result.trigger,
                hops = taken,
                "auto-forward cascade stopped after visiting every configured state"
            );
            return None;
        }
        Some(auto)
    }

    /// Apply an auto-forward hop whose condition matched.
    pub(crate) fn forward(
        &self,
        context: &mut T,
        result: &mut StateTransitionResult<S, G>,
        auto: &Transition<S, F::Condition>,
    ) {
        debug!(
            from = ?result.current_state,
            to = ?auto.to,
            name = auto.label(),
            "auto-forwarding"
        );
        result.advance(auto.to.clone(), auto.label());
        (self.mutator)(context, result.current_state.clone());
    }

    /// Raise the result-level notifications.
    pub(crate) fn finish(&self, result: &StateTransitionResult<S, G>) {
        if !result.was_transitioned {
            debug!(
                trigger = ?result.trigger,
                defined = result.transition_defined,
                "no transition"
            );
        }
        self.hooks.finished(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::flavor::Blocking;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    enum Stage {
        Draft,
        Review,
        Published,
    }

    struct Post {
        stage: Stage,
    }

    fn engine() -> Engine<Post, Stage, &'static str, Blocking<Post, ()>> {
        Engine::new(|post: &Post| post.stage, |post: &mut Post, stage| post.stage = stage)
    }

    #[test]
    fn candidates_mark_definition_per_level() {
        let mut engine = engine();
        engine
            .configure_state(Stage::Review)
            .permit("publish", Transition::to(Stage::Published));
        engine
            .configure_state(Stage::Draft)
            .substate_of(Stage::Review)
            .unwrap();

        let mut result = StateTransitionResult::unresolved("publish", Stage::Draft);
        let levels: Vec<usize> = engine
            .lineage(&Stage::Draft)
            .map(|config| engine.candidates(config, &mut result).len())
            .collect();

        assert_eq!(levels, vec![0, 1]);
        assert!(result.transition_defined);
    }

    #[test]
    fn commit_writes_through_mutator() {
        let mut engine = engine();
        engine
            .configure_state(Stage::Draft)
            .permit("submit", Transition::to(Stage::Review));

        let mut post = Post { stage: Stage::Draft };
        let mut result = StateTransitionResult::unresolved("submit", Stage::Draft);
        let transition = &engine.configuration(&Stage::Draft).unwrap().transitions(&"submit")[0];
        engine.commit(&mut post, &mut result, transition);

        assert_eq!(post.stage, Stage::Review);
        assert_eq!(result.last_transition_name.as_deref(), Some("Draft2Review"));
    }

    #[test]
    fn auto_forward_is_capped_by_state_count() {
        let mut engine = engine();
        engine
            .configure_state(Stage::Review)
            .auto_forward("submit", Transition::to(Stage::Published))
            .unwrap();
        engine.configure_state(Stage::Published);

        let mut result = StateTransitionResult::unresolved("submit", Stage::Draft);
        result.select(Stage::Review, "Draft2Review", false);
        let plan = engine.plan(&result);

        assert!(engine.next_auto_forward(&result, &plan, 0).is_some());
        assert!(engine.next_auto_forward(&result, &plan, 1).is_some());
        assert!(engine.next_auto_forward(&result, &plan, 2).is_none());
    }

    #[test]
    fn visible_transitions_include_ancestors() {
        let mut engine = engine();
        engine
            .configure_state(Stage::Review)
            .permit("publish", Transition::to(Stage::Published));
        engine
            .configure_state(Stage::Draft)
            .substate_of(Stage::Review)
            .unwrap()
            .permit("submit", Transition::to(Stage::Review));

        let post = Post { stage: Stage::Draft };
        let triggers: Vec<&str> = engine
            .visible_transitions(&post)
            .into_iter()
            .map(|(trigger, _)| *trigger)
            .collect();

        assert_eq!(triggers, vec!["submit", "publish"]);
    }
}
