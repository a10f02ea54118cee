//! Timestamp formatting with chrono.

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::domain::ports::DateTimeFormatPort;

/// Formats timestamps with a chrono format string.
///
/// Uses a fixed UTC offset when configured, the local time zone otherwise.
#[derive(Debug, Clone)]
pub struct ChronoDateTimeFormatter {
    format: String,
    offset: Option<FixedOffset>,
}

impl ChronoDateTimeFormatter {
    /// Creates a formatter rendering in local time.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            offset: None,
        }
    }

    /// Renders in a fixed offset instead of local time. Out-of-range offsets are ignored.
    #[must_use]
    pub fn with_offset_minutes(mut self, minutes: Option<i32>) -> Self {
        self.offset = minutes.and_then(|m| FixedOffset::east_opt(m.saturating_mul(60)));
        self
    }
}

impl DateTimeFormatPort for ChronoDateTimeFormatter {
    fn format_date_time(&self, timestamp: &DateTime<Utc>) -> String {
        match self.offset {
            Some(offset) => timestamp.with_timezone(&offset).format(&self.format).to_string(),
            None => {
                let local: DateTime<Local> = (*timestamp).into();
                local.format(&self.format).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case(Some(0), "2024-03-01 09:30" ; "utc")]
    #[test_case(Some(120), "2024-03-01 11:30" ; "plus two hours")]
    #[test_case(Some(-90), "2024-03-01 08:00" ; "minus ninety minutes")]
    fn test_fixed_offset(minutes: Option<i32>, expected: &str) {
        let formatter = ChronoDateTimeFormatter::new("%Y-%m-%d %H:%M").with_offset_minutes(minutes);
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        assert_eq!(formatter.format_date_time(&timestamp), expected);
    }

    #[test]
    fn test_custom_format_in_local_time() {
        let formatter = ChronoDateTimeFormatter::new("%Y");
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert_eq!(formatter.format_date_time(&timestamp), "2024");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_local() {
        let formatter = ChronoDateTimeFormatter::new("%Y").with_offset_minutes(Some(100_000));
        assert!(formatter.offset.is_none());
    }
}
