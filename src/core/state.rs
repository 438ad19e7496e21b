//! Identity traits for states and triggers.
//!
//! The engine never owns the value that carries a state. It only needs to
//! compare, order and hash state and trigger identities, so both traits are
//! markers with blanket implementations.

use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a state.
///
/// States are used as registry keys and are compared with [`Ord`] when
/// deciding whether a transition re-enters the state it started from.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>() {}
/// assert_state::<Door>();
/// ```
pub trait State: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

impl<S> State for S where S: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

/// Identity of a trigger.
///
/// Triggers key the global action table, the state-scoped action tables and
/// the per-state transition lists.
pub trait Trigger: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<G> Trigger for G where G: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
