//! Builder for configured transitions.

use crate::core::{AsyncGuard, Guard};
use futures::future::BoxFuture;
use std::fmt::Debug;

/// A configured edge from the owning state to a target state.
///
/// The source state is implicit: it is the state whose configuration the
/// transition is registered on. Transitions sharing a trigger are tried in
/// ascending `priority` order, registration order breaking ties.
///
/// # Example
///
/// ```rust
/// use statekeeper::builder::Transition;
/// use statekeeper::core::Guard;
///
/// struct Sale {
///     balance: i64,
/// }
///
/// let settle: Transition<&str, Guard<Sale>> = Transition::to("Complete")
///     .named("Open2Complete")
///     .priority(2)
///     .when(|sale: &Sale| sale.balance == 0);
///
/// assert_eq!(settle.target(), &"Complete");
/// assert!(settle.is_conditional());
/// ```
pub struct Transition<S, C> {
    pub(crate) to: S,
    pub(crate) name: Option<String>,
    pub(crate) priority: i32,
    pub(crate) condition: Option<C>,
}

impl<S, C> Transition<S, C> {
    /// Unconditional transition to `state` with priority 0.
    pub fn to(state: S) -> Self {
        Self {
            to: state,
            name: None,
            priority: 0,
            condition: None,
        }
    }

    /// Set a display name.
    ///
    /// Unnamed transitions are called `"{from:?}2{to:?}"` once registered.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the priority. Lower values are tried first.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a prebuilt condition.
    pub fn guard(mut self, condition: C) -> Self {
        self.condition = Some(condition);
        self
    }

    /// The state this transition leads to.
    pub fn target(&self) -> &S {
        &self.to
    }

    /// The display name, once assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The priority rank.
    pub fn rank(&self) -> i32 {
        self.priority
    }

    /// Whether a condition is attached.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub(crate) fn name_from<F: Debug>(&mut self, from: &F)
    where
        S: Debug,
    {
        if self.name.is_none() {
            self.name = Some(format!("{:?}2{:?}", from, self.to));
        }
    }
}

impl<S, T> Transition<S, Guard<T>> {
    /// Attach a synchronous condition over the context.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }
}

impl<S, T> Transition<S, AsyncGuard<T>> {
    /// Attach an asynchronous condition over the context.
    pub fn when_async<F>(self, predicate: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        self.guard(AsyncGuard::new(predicate))
    }
}

/// Insert keeping ascending priority, after any existing equal priorities.
pub(crate) fn insert_by_priority<S, C>(list: &mut Vec<Transition<S, C>>, transition: Transition<S, C>) {
    let position = list.partition_point(|existing| existing.priority <= transition.priority);
    list.insert(position, transition);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum TestState {
        Open,
        Complete,
        ChangeDue,
    }

    struct Sale {
        balance: i64,
    }

    #[test]
    fn defaults_are_unconditional_priority_zero() {
        let transition: Transition<TestState, Guard<Sale>> = Transition::to(TestState::Complete);

        assert_eq!(transition.target(), &TestState::Complete);
        assert_eq!(transition.rank(), 0);
        assert!(!transition.is_conditional());
        assert!(transition.name().is_none());
    }

    #[test]
    fn default_name_joins_states() {
        let mut transition: Transition<TestState, Guard<Sale>> = Transition::to(TestState::Complete);
        transition.name_from(&TestState::Open);

        assert_eq!(transition.label(), "Open2Complete");
    }

    #[test]
    fn explicit_name_is_kept() {
        let mut transition: Transition<TestState, Guard<Sale>> =
            Transition::to(TestState::Complete).named("Settle");
        transition.name_from(&TestState::Open);

        assert_eq!(transition.label(), "Settle");
    }

    #[test]
    fn when_attaches_guard() {
        let transition = Transition::to(TestState::ChangeDue).when(|sale: &Sale| sale.balance < 0);

        let guard = transition.condition.as_ref().unwrap();
        assert!(guard.check(&Sale { balance: -5 }));
        assert!(!guard.check(&Sale { balance: 0 }));
    }

    #[test]
    fn insertion_is_stable_by_priority() {
        let mut list: Vec<Transition<TestState, Guard<Sale>>> = Vec::new();
        insert_by_priority(&mut list, Transition::to(TestState::Complete).priority(2).named("a"));
        insert_by_priority(&mut list, Transition::to(TestState::ChangeDue).priority(1).named("b"));
        insert_by_priority(&mut list, Transition::to(TestState::Open).priority(2).named("c"));
        insert_by_priority(&mut list, Transition::to(TestState::Open).priority(1).named("d"));

        let names: Vec<&str> = list.iter().map(Transition::label).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }
}
