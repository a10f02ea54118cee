//! Domain layer with core entities, events and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Semantic UI events.
pub mod events;
/// Notification definitions.
pub mod notification;
/// Raw pointer input.
pub mod pointer;
/// Port definitions.
pub mod ports;

pub use entities::{Entity, EntityConfig, ListConfig};
pub use errors::StorageError;
pub use events::UiEvent;
pub use notification::{Notification, NotificationLevel};
pub use pointer::{PointerInput, PointerKind, PointerPhase, PointerTarget};
pub use ports::{DateTimeFormatPort, ListConfigStoragePort, LocalizationPort, NotificationPort};
