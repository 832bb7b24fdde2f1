//! # State Guardian
//!
//! A small reactive state core: one state container with field-level
//! observation, plus the helpers that usually surround it.
//!
//! ## Core Concepts
//!
//! - **Store**: holds one state value; `dispatch` merges a patch computed from
//!   the current value and republishes
//! - **Selectors**: per-field channels that replay the current value, then
//!   emit after every dispatch
//! - **Effects**: async calls whose success or failure maps to exactly one
//!   dispatch
//! - **Middleware**: ordered, failure-isolated observers of actions, invoked
//!   explicitly by callers
//! - **Helpers**: entity collection operations, normalization, a keyed cache
//!
//! ## Example
//!
//! ```ignore
//! use state_guardian::{EffectConfig, EffectRunner, Field, Store};
//! use std::sync::Arc;
//!
//! let store = Arc::new(Store::new(AppState::default()));
//! let user = store.select(Field::new("user", |s: &AppState| s.user.clone()));
//!
//! store.dispatch(|s| AppPatch { count: Some(s.count + 1), ..Default::default() });
//!
//! let effects = EffectRunner::current(Arc::clone(&store))?;
//! effects.handle_effect(EffectConfig::new(
//!     || api.fetch_user(),
//!     |u| Ok(AppPatch { user: Some(Some(u)), ..Default::default() }),
//!     |e| Ok(AppPatch { error: Some(Some(e.to_string())), ..Default::default() }),
//! ));
//! ```

pub mod cache;
pub mod effects;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod normalize;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use cache::Cache;
pub use effects::{EffectConfig, EffectHandle, EffectOutcome, EffectRunner};
pub use entities::{add_many, add_one, delete_one, update_one};
pub use error::{BoxError, HandlerStage, Result, StoreError};
pub use middleware::{
    tracing_middleware, FailureReason, InterceptReport, Middleware, MiddlewareChain,
    MiddlewareFailure,
};
pub use normalize::{normalize, normalize_by_field};
pub use state::State;
pub use store::{Store, StoreConfig};
pub use subscriptions::{Field, Selection, SubscriptionManager};
pub use tokio_util::sync::CancellationToken;
pub use types::*;
