//! Single process-wide state store.

mod actions;
mod app_store;
mod handle;

pub use actions::{ChangeKind, StoreAction};
pub use app_store::AppStore;
pub use handle::{StoreChange, StoreHandle};
