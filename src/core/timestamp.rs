//! Timestamp capture for log entries
//!
//! Entries carry their timestamp as a preformatted string taken on the
//! calling thread, so every delivery of one entry shows the same time no
//! matter how long it waited in the queue.

use chrono::{DateTime, Local, TimeZone};

/// `YYYY-MM-DD HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format a point in time the way entries record it
#[must_use]
pub fn format_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local wall-clock time, formatted
#[must_use]
pub fn now() -> String {
    format_timestamp(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fixed_format() {
        let datetime = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(7);
        assert_eq!(format_timestamp(&datetime), "2025-01-08 10:30:45.007");
    }

    #[test]
    fn test_now_shape() {
        let stamp = now();
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], ".");
    }
}
