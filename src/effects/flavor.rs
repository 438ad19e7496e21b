//! Execution flavors.
//!
//! A flavor fixes the callable types stored in a configuration. The
//! registry, the lineage walk and the hop planner are shared; only the
//! machine that drives them differs in how callbacks are invoked.

use crate::core::{AsyncGuard, Guard};
use crate::effects::action::{Action, AsyncAction, AsyncTriggerAction, TriggerAction};
use std::marker::PhantomData;

/// Callable types used by one execution path.
pub trait Flavor {
    /// Transition condition
    type Condition: Send + Sync;
    /// Entry, exit and reentry action
    type Action: Send + Sync;
    /// Global or state-scoped trigger action
    type TriggerAction: Send + Sync;
}

/// Callbacks run to completion on the caller's thread.
pub struct Blocking<T, R>(PhantomData<fn() -> (T, R)>);

impl<T: 'static, R: 'static> Flavor for Blocking<T, R> {
    type Condition = Guard<T>;
    type Action = Action<T>;
    type TriggerAction = TriggerAction<T, R>;
}

/// Callbacks return futures and may suspend.
pub struct Suspending<T, R>(PhantomData<fn() -> (T, R)>);

impl<T: 'static, R: 'static> Flavor for Suspending<T, R> {
    type Condition = AsyncGuard<T>;
    type Action = AsyncAction<T>;
    type TriggerAction = AsyncTriggerAction<T, R>;
}
