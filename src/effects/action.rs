//! Embedder-supplied actions.
//!
//! Entry, exit and reentry actions only see the context. Trigger actions
//! also see the request payload, and declare at registration which payload
//! they expect: none, the whole request, or one variant type extracted
//! with `TryFrom<&R>`.

use crate::effects::error::{ActionError, MachineError};
use futures::future::{self, BoxFuture};
use std::any::type_name;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Result returned by every action.
pub type ActionResult = Result<(), ActionError>;

/// Synchronous entry, exit or reentry action.
pub type Action<T> = Box<dyn Fn(&mut T) -> ActionResult + Send + Sync>;

/// Asynchronous entry, exit or reentry action.
pub type AsyncAction<T> = Box<dyn for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync>;

pub(crate) enum ActionFailure {
    Mismatch,
    Failed(ActionError),
}

impl ActionFailure {
    fn into_machine_error<G: Debug>(self, trigger: &G, expects: Option<&'static str>) -> MachineError {
        match self {
            ActionFailure::Mismatch => MachineError::TypeMismatch {
                trigger: format!("{trigger:?}"),
                expected: expects.unwrap_or("unknown"),
            },
            ActionFailure::Failed(source) => MachineError::Action(source),
        }
    }
}

type Dispatch<T, R> = Box<dyn Fn(&mut T, Option<&R>) -> Result<(), ActionFailure> + Send + Sync>;

/// Synchronous action bound to a trigger.
///
/// # Example
///
/// ```rust
/// use statekeeper::effects::TriggerAction;
///
/// struct Sale {
///     balance: i64,
/// }
///
/// enum Request {
///     Item(i64),
///     Payment(i64),
/// }
///
/// struct Payment(i64);
///
/// impl TryFrom<&Request> for Payment {
///     type Error = ();
///
///     fn try_from(request: &Request) -> Result<Self, ()> {
///         match request {
///             Request::Payment(amount) => Ok(Payment(*amount)),
///             _ => Err(()),
///         }
///     }
/// }
///
/// let pay: TriggerAction<Sale, Request> = TriggerAction::typed(|sale: &mut Sale, payment: Payment| {
///     sale.balance -= payment.0;
///     Ok(())
/// });
///
/// assert!(pay.expects().is_some());
/// ```
pub struct TriggerAction<T, R> {
    expects: Option<&'static str>,
    run: Dispatch<T, R>,
}

impl<T, R> TriggerAction<T, R> {
    /// Action that ignores any request payload.
    pub fn plain<F>(action: F) -> Self
    where
        F: Fn(&mut T) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            expects: None,
            run: Box::new(move |context: &mut T, _request: Option<&R>| {
                action(context).map_err(ActionFailure::Failed)
            }),
        }
    }

    /// Action that requires the request payload to be present.
    pub fn with_request<F>(action: F) -> Self
    where
        F: Fn(&mut T, &R) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            expects: Some(type_name::<R>()),
            run: Box::new(move |context: &mut T, request: Option<&R>| {
                let request = request.ok_or(ActionFailure::Mismatch)?;
                action(context, request).map_err(ActionFailure::Failed)
            }),
        }
    }

    /// Action that requires the request to convert into `P`.
    pub fn typed<P, F>(action: F) -> Self
    where
        P: for<'r> TryFrom<&'r R> + 'static,
        F: Fn(&mut T, P) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            expects: Some(type_name::<P>()),
            run: Box::new(move |context: &mut T, request: Option<&R>| {
                let payload = request
                    .and_then(|request| P::try_from(request).ok())
                    .ok_or(ActionFailure::Mismatch)?;
                action(context, payload).map_err(ActionFailure::Failed)
            }),
        }
    }

    /// Name of the payload type this action expects, if any.
    pub fn expects(&self) -> Option<&'static str> {
        self.expects
    }

    pub(crate) fn invoke<G: Debug>(
        &self,
        trigger: &G,
        context: &mut T,
        request: Option<&R>,
    ) -> Result<(), MachineError> {
        (self.run)(context, request).map_err(|failure| failure.into_machine_error(trigger, self.expects))
    }
}

trait AsyncDispatch<T, R>: Send + Sync {
    fn dispatch<'a>(
        &'a self,
        context: &'a mut T,
        request: Option<&'a R>,
    ) -> BoxFuture<'a, Result<(), ActionFailure>>;
}

struct Plain<F>(F);

impl<T, R, F> AsyncDispatch<T, R> for Plain<F>
where
    F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync,
{
    fn dispatch<'a>(
        &'a self,
        context: &'a mut T,
        _request: Option<&'a R>,
    ) -> BoxFuture<'a, Result<(), ActionFailure>> {
        let pending = (self.0)(context);
        Box::pin(async move { pending.await.map_err(ActionFailure::Failed) })
    }
}

struct WithRequest<F>(F);

impl<T, R, F> AsyncDispatch<T, R> for WithRequest<F>
where
    F: for<'a> Fn(&'a mut T, &'a R) -> BoxFuture<'a, ActionResult> + Send + Sync,
{
    fn dispatch<'a>(
        &'a self,
        context: &'a mut T,
        request: Option<&'a R>,
    ) -> BoxFuture<'a, Result<(), ActionFailure>> {
        match request {
            Some(request) => {
                let pending = (self.0)(context, request);
                Box::pin(async move { pending.await.map_err(ActionFailure::Failed) })
            }
            None => Box::pin(future::ready(Err(ActionFailure::Mismatch))),
        }
    }
}

struct Typed<P, F> {
    action: F,
    _payload: PhantomData<fn() -> P>,
}

impl<T, R, P, F> AsyncDispatch<T, R> for Typed<P, F>
where
    P: for<'r> TryFrom<&'r R>,
    F: for<'a> Fn(&'a mut T, P) -> BoxFuture<'a, ActionResult> + Send + Sync,
{
    fn dispatch<'a>(
        &'a self,
        context: &'a mut T,
        request: Option<&'a R>,
    ) -> BoxFuture<'a, Result<(), ActionFailure>> {
        match request.and_then(|request| P::try_from(request).ok()) {
            Some(payload) => {
                let pending = (self.action)(context, payload);
                Box::pin(async move { pending.await.map_err(ActionFailure::Failed) })
            }
            None => Box::pin(future::ready(Err(ActionFailure::Mismatch))),
        }
    }
}

/// Asynchronous action bound to a trigger.
///
/// Mirrors [`TriggerAction`] with future-returning callbacks.
pub struct AsyncTriggerAction<T, R> {
    expects: Option<&'static str>,
    run: Box<dyn AsyncDispatch<T, R>>,
}

impl<T: 'static, R: 'static> AsyncTriggerAction<T, R> {
    /// Action that ignores any request payload.
    pub fn plain<F>(action: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        Self {
            expects: None,
            run: Box::new(Plain(action)),
        }
    }

    /// Action that requires the request payload to be present.
    pub fn with_request<F>(action: F) -> Self
    where
        F: for<'a> Fn(&'a mut T, &'a R) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        Self {
            expects: Some(type_name::<R>()),
            run: Box::new(WithRequest(action)),
        }
    }

    /// Action that requires the request to convert into `P`.
    pub fn typed<P, F>(action: F) -> Self
    where
        P: for<'r> TryFrom<&'r R> + 'static,
        F: for<'a> Fn(&'a mut T, P) -> BoxFuture<'a, ActionResult> + Send + Sync + 'static,
    {
        Self {
            expects: Some(type_name::<P>()),
            run: Box::new(Typed {
                action,
                _payload: PhantomData,
            }),
        }
    }
}

impl<T, R> AsyncTriggerAction<T, R> {
    /// Name of the payload type this action expects, if any.
    pub fn expects(&self) -> Option<&'static str> {
        self.expects
    }

    pub(crate) async fn invoke<G: Debug + Sync>(
        &self,
        trigger: &G,
        context: &mut T,
        request: Option<&R>,
    ) -> Result<(), MachineError> {
        self.run
            .dispatch(context, request)
            .await
            .map_err(|failure| failure.into_machine_error(trigger, self.expects))
    }
}
