//! Display formatting for areas, dates and free text.
//!
//! Prices live in [`crate::money`].

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format an area in square metres with two decimals, e.g. `10.00 m²`.
pub fn format_area(area: f64) -> String {
    format!("{:.2} m\u{b2}", area)
}

/// Format a date as `dd.mm.yyyy`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%d.%m.%Y").to_string()
}

/// Format a date and time as `dd.mm.yyyy HH:MM`.
pub fn format_datetime<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%d.%m.%Y %H:%M").to_string()
}

/// Truncate text to `max_len` characters, appending `...` when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(10.0), "10.00 m\u{b2}");
        assert_eq!(format_area(3.14159), "3.14 m\u{b2}");
    }

    #[test]
    fn test_format_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_date(&dt), "07.03.2024");
        assert_eq!(format_datetime(&dt), "07.03.2024 09:05");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("Flügeltor bis 11 m²", 9), "Flügeltor...");
    }
}
