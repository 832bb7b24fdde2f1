//! Error types for the state store.

use std::fmt;
use thiserror::Error;

/// Boxed error produced by user callbacks (mutators, handlers, middleware).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which effect handler produced a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerStage {
    Success,
    Error,
}

impl fmt::Display for HandlerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerStage::Success => write!(f, "success"),
            HandlerStage::Error => write!(f, "error"),
        }
    }
}

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Mutator failed: {0}")]
    Mutator(#[source] BoxError),

    #[error("Effect {stage} handler failed: {source}")]
    Handler {
        stage: HandlerStage,
        #[source]
        source: BoxError,
    },

    #[error("Effect task aborted: {0}")]
    EffectAborted(String),

    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Entity {index} has no key field {field:?}")]
    MissingKey { field: String, index: usize },
}

impl StoreError {
    /// Wrap a mutator failure.
    pub fn mutator(e: impl Into<BoxError>) -> Self {
        StoreError::Mutator(e.into())
    }

    /// Wrap an effect handler failure.
    pub fn handler(stage: HandlerStage, e: impl Into<BoxError>) -> Self {
        StoreError::Handler {
            stage,
            source: e.into(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
