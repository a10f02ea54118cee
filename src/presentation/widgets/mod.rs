mod entity_list_item;
mod list_config_panel;

pub use entity_list_item::{EntityListItem, EntityListItemMode};
pub use list_config_panel::{ListConfigPanel, PanelOverlays, PanelSection};
