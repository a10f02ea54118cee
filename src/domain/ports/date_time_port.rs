use chrono::{DateTime, Utc};

/// Port for locale-aware timestamp formatting.
pub trait DateTimeFormatPort: Send + Sync {
    /// Formats a timestamp for display.
    fn format_date_time(&self, timestamp: &DateTime<Utc>) -> String;
}
