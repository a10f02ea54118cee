mod date_time_port;
mod list_config_storage_port;
mod localization_port;
mod notification_port;

pub use date_time_port::DateTimeFormatPort;
pub use list_config_storage_port::ListConfigStoragePort;
pub use localization_port::LocalizationPort;
pub use notification_port::NotificationPort;
