//! Application layer with the state store and services.

/// Services coordinating ports, store and presentation.
pub mod services;
/// Single process-wide state store.
pub mod store;

pub use services::{ListConfigSynchronizer, PropertyRenderer};
pub use store::{AppStore, StoreAction, StoreHandle};
