//! Field-level observation of store state.
//!
//! Selectors are registered per store and receive:
//! - the selected field's value at subscription time (replay)
//! - the field's value after every dispatch, changed or not
//!
//! Values are delivered over crossbeam channels; publishing never blocks.
//! With a bounded buffer, a subscriber that falls behind is dropped.
//!
//! # Example
//!
//! ```ignore
//! let store = Store::new(AppState::default());
//! let user = store.select(Field::new("user", |s: &AppState| s.user.clone()));
//!
//! // Current value first
//! let initial = user.recv()?;
//!
//! store.dispatch(|_| AppPatch { user: Some(Some("ada".into())), ..Default::default() });
//! let updated = user.recv()?;
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{Field, Selection};
