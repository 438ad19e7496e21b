//! Fluent handle for configuring one state.

use crate::builder::Transition;
use crate::config::registry::Registry;
use crate::config::{Callback, ConfigurationError, StateConfiguration};
use crate::core::{State, Trigger};
use crate::effects::action::ActionResult;
use crate::effects::flavor::{Blocking, Flavor, Suspending};
use futures::future::BoxFuture;

/// Handle returned by `configure_state`.
///
/// Every call adds to the configuration of one state. Calls that can be
/// rejected return `Result` so they compose with `?`.
///
/// # Example
///
/// ```rust
/// use statekeeper::builder::Transition;
/// use statekeeper::effects::StateMachine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// enum Light {
///     Off,
///     On,
///     Dimmed,
/// }
///
/// struct Lamp {
///     light: Light,
///     switches: u32,
/// }
///
/// let mut machine: StateMachine<Lamp, Light, &str> =
///     StateMachine::new(|lamp: &Lamp| lamp.light, |lamp: &mut Lamp, light| lamp.light = light);
///
/// machine
///     .configure_state(Light::Off)
///     .permit("toggle", Transition::to(Light::On))
///     .on_exit(|lamp: &mut Lamp| {
///         lamp.switches += 1;
///         Ok(())
///     });
/// machine
///     .configure_state(Light::Dimmed)
///     .substate_of(Light::On)
///     .unwrap();
/// ```
pub struct StateConfigurator<'m, S: State, G: Trigger, F: Flavor> {
    registry: &'m mut Registry<S, G, F>,
    state: S,
}

impl<'m, S: State, G: Trigger, F: Flavor> StateConfigurator<'m, S, G, F> {
    pub(crate) fn new(registry: &'m mut Registry<S, G, F>, state: S) -> Self {
        registry.get_or_insert(state.clone());
        Self { registry, state }
    }

    fn config(&mut self) -> &mut StateConfiguration<S, G, F> {
        self.registry.get_or_insert(self.state.clone())
    }

    /// The state being configured.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Allow `trigger` to move this state along `transition`.
    pub fn permit(mut self, trigger: G, transition: Transition<S, F::Condition>) -> Self {
        self.config().add_transition(trigger, transition);
        self
    }

    /// Follow `transition` right after this state is entered by `trigger`.
    pub fn auto_forward(
        mut self,
        trigger: G,
        transition: Transition<S, F::Condition>,
    ) -> Result<Self, ConfigurationError> {
        self.config().add_auto_forward(trigger, transition)?;
        Ok(self)
    }

    /// Nest this state inside `superstate`.
    pub fn substate_of(self, superstate: S) -> Result<Self, ConfigurationError> {
        self.registry.set_superstate(&self.state, superstate)?;
        Ok(self)
    }

    /// Run `action` whenever `trigger` is resolved in this state.
    pub fn on_trigger(mut self, trigger: G, action: F::TriggerAction) -> Self {
        self.config().add_trigger_action(trigger, action);
        self
    }

    fn callback(mut self, kind: Callback, action: F::Action) -> Self {
        self.config().set_callback(kind, action);
        self
    }
}

impl<'m, T: 'static, S: State, G: Trigger, R: 'static> StateConfigurator<'m, S, G, Blocking<T, R>> {
    /// Run `action` when the state is entered from outside its subtree.
    pub fn on_entry<A>(self, action: A) -> Self
    where
        A: Fn(&mut T) -> ActionResult + Send + Sync + 'static,
    {
        self.callback(Callback::Entry, Box::new(action))
    }

    /// Run `action` when the state is left for a state outside its subtree.
    pub fn on_exit<A>(self, action: A) -> Self
    where
        A: Fn(&mut T) -> ActionResult + Send + Sync + 'static,
    {
        self.callback(Callback::Exit, Box::new(action))
    }

    /// Run `action` when a transition ends in the state it started from.
    pub fn on_reentry<A>(self, action: A) -> Self
    where
        A: Fn(&mut T) -> ActionResult + Send + Sync + 'static,
    {
        self.callback(Callback::Reentry, Box::new(action))
    }
}

impl<'m, T: 'static, S: State, G: Trigger, R: 'static> StateConfigurator<'m, S, G, Suspending<T, R>> {
    /// Run `action` when the state is entered from outside its subtree.
    pub fn on_entry<A>(self, action: A) -> Self
    where
        A: for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        self.callback(Callback::Entry, Box::new(action))
    }

    /// Run `action` when the state is left for a state outside its subtree.
    pub fn on_exit<A>(self, action: A) -> Self
    where
        A: for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        self.callback(Callback::Exit, Box::new(action))
    }

    /// Run `action` when a transition ends in the state it started from.
    pub fn on_reentry<A>(self, action: A) -> Self
    where
        A: for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        self.callback(Callback::Reentry, Box::new(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    enum Phase {
        Open,
        Complete,
        Closed,
    }

    struct Sale {
        balance: i64,
    }

    type SyncRegistry = Registry<Phase, &'static str, Blocking<Sale, ()>>;

    #[test]
    fn configuring_registers_state() {
        let mut registry = SyncRegistry::new();
        let configurator = StateConfigurator::new(&mut registry, Phase::Open);

        assert_eq!(configurator.state(), &Phase::Open);
        assert!(registry.get(&Phase::Open).is_some());
    }

    #[test]
    fn chained_calls_accumulate() {
        let mut registry = SyncRegistry::new();
        StateConfigurator::new(&mut registry, Phase::Open)
            .permit("pay", Transition::to(Phase::Complete))
            .permit("void", Transition::to(Phase::Closed))
            .on_entry(|sale: &mut Sale| {
                sale.balance = 0;
                Ok(())
            });

        let config = registry.get(&Phase::Open).unwrap();
        assert_eq!(config.triggers().count(), 2);
        assert!(config.callback(Callback::Entry).is_some());
    }

    #[test]
    fn rejected_superstate_leaves_configuration() {
        let mut registry = SyncRegistry::new();
        StateConfigurator::new(&mut registry, Phase::Complete)
            .substate_of(Phase::Open)
            .unwrap();

        let result = StateConfigurator::new(&mut registry, Phase::Open).substate_of(Phase::Complete);

        assert!(matches!(result, Err(ConfigurationError::SuperstateCycle { .. })));
        assert_eq!(
            registry.get(&Phase::Complete).unwrap().superstate(),
            Some(&Phase::Open)
        );
    }

    #[test]
    fn async_callbacks_are_stored() {
        let mut registry: Registry<Phase, &'static str, Suspending<Sale, ()>> = Registry::new();
        StateConfigurator::new(&mut registry, Phase::Closed).on_exit(|sale: &mut Sale| {
            Box::pin(async move {
                sale.balance = -1;
                Ok(())
            })
        });

        assert!(registry.callback(Callback::Exit, &Phase::Closed).is_some());
        assert!(registry.callback(Callback::Entry, &Phase::Closed).is_none());
    }
}
