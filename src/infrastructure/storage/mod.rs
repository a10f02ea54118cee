//! List configuration storage adapters.

mod toml_list_config_storage;

pub use toml_list_config_storage::TomlListConfigStorage;
