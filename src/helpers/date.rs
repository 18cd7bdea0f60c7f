//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a Notion date string.
///
/// Notion stores either a plain date (`2024-01-15`) or a full timestamp
/// with offset (`2024-01-15T10:30:00.000+09:00`). Timestamps keep their
/// wall-clock time in the stored offset.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format as `YYYY-MM-DD`; empty when the date is missing or invalid
pub fn display_date(s: &str) -> String {
    parse_date_string(s)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Format as `YYYY-MM-DD HH:MM:SS` for Hexo front-matter
pub fn front_matter_date(s: &str) -> Option<String> {
    parse_date_string(s).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");
    }

    #[test]
    fn test_parse_timestamp_keeps_wall_clock() {
        let dt = parse_date_string("2024-01-15T23:30:00.000+09:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 23:30");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-15T10:30:00Z"), "2024-01-15");
        assert_eq!(display_date(""), "");
        assert_eq!(display_date("someday"), "");
    }

    #[test]
    fn test_front_matter_date() {
        assert_eq!(
            front_matter_date("2024-01-15").as_deref(),
            Some("2024-01-15 00:00:00")
        );
        assert_eq!(front_matter_date(""), None);
    }
}
