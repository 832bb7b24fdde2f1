//! Per-invocation effect configuration.

use crate::error::BoxError;
use crate::state::State;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tokio_util::sync::CancellationToken;

pub(crate) type ApiCall<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;
pub(crate) type Handler<I, P> = Box<dyn FnOnce(I) -> Result<P, BoxError> + Send>;

/// An asynchronous call plus the mappers that turn its outcome into a patch.
///
/// Consumed by [`EffectRunner::handle_effect`](super::EffectRunner::handle_effect).
pub struct EffectConfig<S: State, T, E> {
    pub(crate) api_call: ApiCall<T, E>,
    pub(crate) on_success: Handler<T, S::Patch>,
    pub(crate) on_error: Handler<E, S::Patch>,
    pub(crate) cancel: Option<CancellationToken>,
    pub(crate) label: String,
}

impl<S, T, E> EffectConfig<S, T, E>
where
    S: State,
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new<C, Fut, OnOk, OnErr>(api_call: C, on_success: OnOk, on_error: OnErr) -> Self
    where
        C: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        OnOk: FnOnce(T) -> Result<S::Patch, BoxError> + Send + 'static,
        OnErr: FnOnce(E) -> Result<S::Patch, BoxError> + Send + 'static,
    {
        Self {
            api_call: Box::new(move || api_call().boxed()),
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
            cancel: None,
            label: "effect".to_string(),
        }
    }

    /// Abandon the effect, without dispatching, if `token` fires before the
    /// call completes.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Name the effect in log output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
