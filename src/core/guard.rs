//! Guard predicates for controlling transitions.
//!
//! Guards are evaluated against the *current* context at fire time, never at
//! configuration time. A transition without a guard always matches.

use futures::future::BoxFuture;
use std::fmt;

/// Synchronous predicate over a context.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Guard;
///
/// struct Sale {
///     balance: i64,
/// }
///
/// let settled = Guard::new(|sale: &Sale| sale.balance == 0);
///
/// assert!(settled.check(&Sale { balance: 0 }));
/// assert!(!settled.check(&Sale { balance: 5 }));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be free of side effects; it may be evaluated any
    /// number of times, including by [`permitted_triggers`] queries.
    ///
    /// [`permitted_triggers`]: crate::effects::StateMachine::permitted_triggers
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &T) -> bool {
        (self.predicate)(context)
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}

/// Predicate over a context that may suspend.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::AsyncGuard;
///
/// struct Sale {
///     balance: i64,
/// }
///
/// let overpaid = AsyncGuard::new(|sale: &Sale| {
///     let balance = sale.balance;
///     Box::pin(async move { balance < 0 })
/// });
///
/// # futures::executor::block_on(async {
/// assert!(overpaid.check(&Sale { balance: -5 }).await);
/// # });
/// ```
pub struct AsyncGuard<T> {
    predicate: Box<dyn for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync>,
}

impl<T> AsyncGuard<T> {
    /// Create a guard from a future-returning predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        AsyncGuard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub async fn check(&self, context: &T) -> bool {
        (self.predicate)(context).await
    }
}

impl<T> fmt::Debug for AsyncGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncGuard")
    }
}
