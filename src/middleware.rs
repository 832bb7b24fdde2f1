//! Ordered interception chain for action notifications.
//!
//! The chain is independent of the store: callers invoke
//! [`MiddlewareChain::intercept`] alongside their dispatches when they want
//! actions audited or logged. Middlewares run in registration order, and a
//! failing middleware never prevents the following ones from running.

use crate::error::BoxError;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{info, warn};

/// Side-effecting observer of actions.
///
/// `P` is the payload type, typically an enum of the application's actions.
pub trait Middleware<P>: Send + Sync {
    fn handle(&self, action_type: &str, payload: &P) -> Result<(), BoxError>;
}

impl<P, F> Middleware<P> for F
where
    F: Fn(&str, &P) -> Result<(), BoxError> + Send + Sync,
{
    fn handle(&self, action_type: &str, payload: &P) -> Result<(), BoxError> {
        self(action_type, payload)
    }
}

/// How a middleware failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    /// Returned an error.
    Error(String),
    /// Panicked.
    Panic(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Error(msg) => write!(f, "error: {}", msg),
            FailureReason::Panic(msg) => write!(f, "panic: {}", msg),
        }
    }
}

/// One isolated middleware failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MiddlewareFailure {
    /// Registration index of the failing middleware.
    pub index: usize,
    pub action_type: String,
    pub reason: FailureReason,
}

/// What happened during one `intercept` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InterceptReport {
    /// Number of middlewares invoked.
    pub invoked: usize,
    pub failures: Vec<MiddlewareFailure>,
}

impl InterceptReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of middlewares.
pub struct MiddlewareChain<P = serde_json::Value> {
    middlewares: RwLock<Vec<Arc<dyn Middleware<P>>>>,
}

impl<P> MiddlewareChain<P> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            middlewares: RwLock::new(Vec::new()),
        }
    }

    /// Append a middleware. No deduplication.
    pub fn add_middleware<M>(&self, middleware: M)
    where
        M: Middleware<P> + 'static,
    {
        self.middlewares.write().push(Arc::new(middleware));
    }

    /// Number of registered middlewares.
    pub fn len(&self) -> usize {
        self.middlewares.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.read().is_empty()
    }

    /// Run every middleware, in registration order, with the same action.
    ///
    /// Errors and panics are caught per middleware, logged, and collected in
    /// the report; they are never returned to the caller.
    pub fn intercept(&self, action_type: &str, payload: &P) -> InterceptReport {
        // Run against a snapshot so middlewares may register others
        let middlewares: Vec<_> = self.middlewares.read().iter().cloned().collect();
        let mut report = InterceptReport::default();

        for (index, middleware) in middlewares.iter().enumerate() {
            report.invoked += 1;

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                middleware.handle(action_type, payload)
            }));

            let reason = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => FailureReason::Error(e.to_string()),
                Err(panic) => FailureReason::Panic(panic_message(panic.as_ref())),
            };

            warn!(index, action_type, %reason, "middleware failed");
            report.failures.push(MiddlewareFailure {
                index,
                action_type: action_type.to_string(),
                reason,
            });
        }

        report
    }
}

impl<P> Default for MiddlewareChain<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that logs every action at info level.
pub fn tracing_middleware<P: fmt::Debug>() -> impl Middleware<P> {
    |action_type: &str, payload: &P| -> Result<(), BoxError> {
        info!(action_type, payload = ?payload, "action");
        Ok(())
    }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
