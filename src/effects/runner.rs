//! Spawning effects and dispatching their patches.

use crate::error::{HandlerStage, Result, StoreError};
use crate::state::State;
use crate::store::Store;
use crate::types::Version;
use futures::future::BoxFuture;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info_span, Instrument};

use super::config::{EffectConfig, Handler};

/// How an effect ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "version", rename_all = "snake_case")]
pub enum EffectOutcome {
    /// The call succeeded; the success patch was dispatched at this version.
    Succeeded(Version),
    /// The call failed; the error patch was dispatched at this version.
    Failed(Version),
    /// Cancelled before the call completed; nothing was dispatched.
    Cancelled,
}

/// Handle to an in-flight effect.
///
/// Dropping the handle does not cancel the effect.
pub struct EffectHandle {
    task: JoinHandle<Result<EffectOutcome>>,
}

impl EffectHandle {
    /// Wait for the effect to finish.
    ///
    /// Fails with `StoreError::Handler` when a mapper could not produce a
    /// patch, and with `StoreError::EffectAborted` when the task panicked or
    /// was aborted.
    pub async fn outcome(self) -> Result<EffectOutcome> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(StoreError::EffectAborted(e.to_string())),
        }
    }

    /// Abort the effect task. A dispatch that already happened stays applied.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Runs effects against one store.
///
/// Stateless between calls: concurrent effects are independent and their
/// dispatches land in completion order.
pub struct EffectRunner<S: State> {
    store: Arc<Store<S>>,
    runtime: Handle,
}

impl<S: State> Clone for EffectRunner<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            runtime: self.runtime.clone(),
        }
    }
}

impl<S: State> EffectRunner<S> {
    /// Bind a runner to a store, spawning effects on `runtime`.
    pub fn new(store: Arc<Store<S>>, runtime: Handle) -> Self {
        Self { store, runtime }
    }

    /// Bind a runner to a store using the current tokio runtime.
    pub fn current(store: Arc<Store<S>>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| StoreError::NoRuntime(e.to_string()))?;
        Ok(Self::new(store, runtime))
    }

    /// The store effects dispatch into.
    pub fn store(&self) -> &Arc<Store<S>> {
        &self.store
    }

    /// Start an effect.
    ///
    /// The call producer runs here; the returned future runs on the runtime
    /// and this method returns without waiting for it.
    pub fn handle_effect<T, E>(&self, config: EffectConfig<S, T, E>) -> EffectHandle
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let EffectConfig {
            api_call,
            on_success,
            on_error,
            cancel,
            label,
        } = config;

        let call = api_call();
        let store = Arc::clone(&self.store);
        let span = info_span!("effect", label = %label);

        let task = self
            .runtime
            .spawn(run(store, call, on_success, on_error, cancel).instrument(span));

        EffectHandle { task }
    }
}

/// Drive one effect to its single dispatch.
async fn run<S, T, E>(
    store: Arc<Store<S>>,
    call: BoxFuture<'static, std::result::Result<T, E>>,
    on_success: Handler<T, S::Patch>,
    on_error: Handler<E, S::Patch>,
    cancel: Option<CancellationToken>,
) -> Result<EffectOutcome>
where
    S: State,
{
    let result = match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("effect cancelled");
                return Ok(EffectOutcome::Cancelled);
            }
            result = call => result,
        },
        None => call.await,
    };

    let (stage, patch) = match result {
        Ok(data) => (HandlerStage::Success, on_success(data)),
        Err(err) => (HandlerStage::Error, on_error(err)),
    };

    let patch = patch.map_err(|e| {
        let err = StoreError::handler(stage, e);
        error!(%err, "effect handler failed, nothing dispatched");
        err
    })?;

    let version = store.dispatch(move |_| patch);
    debug!(%stage, %version, "effect dispatched");

    Ok(match stage {
        HandlerStage::Success => EffectOutcome::Succeeded(version),
        HandlerStage::Error => EffectOutcome::Failed(version),
    })
}
