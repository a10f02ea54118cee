//! Infrastructure layer with adapters for the domain ports.

/// Application configuration.
pub mod config;
/// Built-in string catalog.
pub mod localization;
/// Toast notifications.
pub mod notifications;
/// List configuration storage adapters.
pub mod storage;
/// Timestamp formatting.
pub mod time_format;

pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use localization::StringCatalog;
pub use notifications::ToastNotifier;
pub use storage::TomlListConfigStorage;
pub use time_format::ChronoDateTimeFormatter;
