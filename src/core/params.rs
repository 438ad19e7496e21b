//! Per-call execution parameters.

use tokio_util::sync::CancellationToken;

/// Everything a single trigger firing works with.
///
/// The context is borrowed for the duration of the call only. The engine
/// keeps no reference to it afterwards.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::ExecutionParameters;
/// use tokio_util::sync::CancellationToken;
///
/// struct Sale {
///     balance: i64,
/// }
///
/// let mut sale = Sale { balance: 0 };
/// let payment = 10_i64;
/// let token = CancellationToken::new();
///
/// let params = ExecutionParameters::new("pay", &mut sale)
///     .with_request(&payment)
///     .with_cancellation(token.clone());
///
/// assert!(!params.is_cancelled());
/// token.cancel();
/// assert!(params.is_cancelled());
/// ```
pub struct ExecutionParameters<'a, T, G, R = ()> {
    /// The trigger being fired
    pub trigger: G,
    /// The context whose state is read and written
    pub context: &'a mut T,
    /// Optional request payload handed to trigger actions
    pub request: Option<&'a R>,
    /// Cancellation signal, only consulted by the async engine
    pub cancellation: Option<CancellationToken>,
}

impl<'a, T, G, R> ExecutionParameters<'a, T, G, R> {
    /// Parameters without a request payload or cancellation signal.
    pub fn new(trigger: G, context: &'a mut T) -> Self {
        Self {
            trigger,
            context,
            request: None,
            cancellation: None,
        }
    }

    /// Attach a request payload.
    pub fn with_request(mut self, request: &'a R) -> Self {
        self.request = Some(request);
        self
    }

    /// Attach a cancellation signal.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Whether cancellation has been requested.
    ///
    /// Always `false` when no signal was attached.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}
