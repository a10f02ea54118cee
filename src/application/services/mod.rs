pub mod gesture;
pub mod list_config_sync;
pub mod markup;
pub mod navigation;
pub mod notification_manager;
pub mod property_renderer;
pub mod sanitizer;

#[cfg(test)]
mod sanitizer_test;

pub use gesture::{GestureDriver, GestureRecognizer, GestureSignal, HOLD_THRESHOLD};
pub use list_config_sync::{
    AddOutcome, DeleteOutcome, ListConfigSynchronizer, LoadOutcome, SaveOutcome, SelectOutcome,
    WriteOutcome,
};
pub use navigation::{BLUR_SETTLE, CarouselNavigator, ListConfigClasses};
pub use notification_manager::NotificationManager;
pub use property_renderer::{DisplayValue, EntityView, PropertyRenderer, PropertyRow, RenderedProperty};
pub use sanitizer::SanitizedHtml;
