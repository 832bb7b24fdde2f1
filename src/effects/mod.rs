//! Asynchronous effects that resolve into exactly one dispatch.
//!
//! An effect pairs an asynchronous call with two patch mappers. The call is
//! spawned on a tokio runtime and the caller gets control back immediately;
//! when the call completes, the success or error mapper turns the outcome
//! into a patch that is dispatched into the bound store.
//!
//! Terminal outcomes:
//! - call succeeded, success mapper produced a patch: one dispatch
//! - call failed, error mapper produced a patch: one dispatch
//! - mapper failed: no dispatch, the handle resolves to `StoreError::Handler`
//! - cancelled before the call completed: no mapper runs, no dispatch

mod config;
mod runner;

pub use config::EffectConfig;
pub use runner::{EffectHandle, EffectOutcome, EffectRunner};
