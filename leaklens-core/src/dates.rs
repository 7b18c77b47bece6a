//! Statement date normalization.
//!
//! Two separate contracts on purpose: `to_iso` falls back to the original
//! text (display must never go blank for non-empty input), `to_month_key`
//! returns `None` (trend buckets must never be keyed by garbage).

use chrono::NaiveDate;

/// Formats tried in order; the first that parses wins.
///
/// "%y" must come before "%Y": chrono's "%Y" also consumes two-digit years
/// (as the literal years 0-99), which would swallow "15-Aug-24" before the
/// two-digit rule gets a chance to read it as 2024.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%b-%y",
    "%d-%b-%Y",
];

fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Normalize to a "YYYY-MM" bucket key, `None` when nothing parses.
pub fn to_month_key(text: &str) -> Option<String> {
    parse_date(text).map(|d| d.format("%Y-%m").to_string())
}

/// Normalize to ISO "YYYY-MM-DD"; unparseable input comes back trimmed
/// but otherwise untouched.
pub fn to_iso(text: &str) -> String {
    match parse_date(text) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formats_reach_same_iso() {
        for raw in ["2024-08-15", "15-08-2024", "15/08/2024", "2024/08/15", "15-Aug-2024", "15-Aug-24"] {
            assert_eq!(to_iso(raw), "2024-08-15", "input: {raw}");
            assert_eq!(to_month_key(raw).as_deref(), Some("2024-08"), "input: {raw}");
        }
    }

    #[test]
    fn test_first_format_wins() {
        // "2024/08/15" must not be read day-first.
        assert_eq!(to_iso("2024/08/15"), "2024-08-15");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(to_iso("  15-Aug-2024  "), "2024-08-15");
    }

    #[test]
    fn test_unparseable_iso_falls_back_to_original() {
        assert_eq!(to_iso("N/A"), "N/A");
        assert_eq!(to_iso("  N/A "), "N/A");
        // Extracted-table dates ("01 Oct, 2025") are not in the format list
        // and stay raw in the display field.
        assert_eq!(to_iso("01 Oct, 2025"), "01 Oct, 2025");
    }

    #[test]
    fn test_unparseable_month_key_is_absent() {
        assert_eq!(to_month_key("N/A"), None);
        assert_eq!(to_month_key(""), None);
        assert_eq!(to_month_key("01 Oct, 2025"), None);
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(to_iso("03-Jan-99"), "1999-01-03");
        assert_eq!(to_iso("03-Jan-24"), "2024-01-03");
    }
}
