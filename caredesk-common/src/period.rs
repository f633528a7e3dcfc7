//! Period key derivation for calendar-bucketed reporting.
//!
//! A bare 3-letter month label collides across years and destroys
//! chronological chart ordering ("Jan" from 2025 and 2026 land in the same
//! bucket). Every row therefore carries two period values: a display label
//! (`Jan-25`) and a zero-padded sort key (`2025-01`) whose lexical order is
//! identical to chronological order. Consumers bucket and sort by the key
//! and display the label.

use chrono::{Datelike, NaiveDate};

/// Display label for a registration period, e.g. "Jan-25".
///
/// chrono's `%b` abbreviations are English regardless of process locale.
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%b-%y").to_string()
}

/// Lexically-sortable period key, e.g. "2025-01".
pub fn month_year_sort_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Calendar year of the registration date.
pub fn year(date: NaiveDate) -> i32 {
    date.year()
}

/// Parse a raw registration date.
///
/// The registration form submits ISO dates; day-first dates appear in
/// records that were bulk-imported from the old spreadsheet. Anything else
/// is unparseable and the caller drops the row (it cannot be placed in any
/// period bucket).
pub fn parse_reg_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = raw?.trim();
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_and_sort_key_formats() {
        assert_eq!(month_year_label(date(2025, 1, 15)), "Jan-25");
        assert_eq!(month_year_sort_key(date(2025, 1, 15)), "2025-01");
        assert_eq!(month_year_label(date(2026, 12, 3)), "Dec-26");
        assert_eq!(month_year_sort_key(date(2026, 12, 3)), "2026-12");
    }

    #[test]
    fn sort_key_orders_chronologically_across_year_boundary() {
        let dec = month_year_sort_key(date(2025, 12, 31));
        let jan = month_year_sort_key(date(2026, 1, 1));
        assert!(dec < jan, "{} must sort before {}", dec, jan);
    }

    #[test]
    fn sort_key_zero_pads_single_digit_months() {
        assert_eq!(month_year_sort_key(date(2025, 2, 1)), "2025-02");
        let feb = month_year_sort_key(date(2025, 2, 1));
        let nov = month_year_sort_key(date(2025, 11, 1));
        assert!(feb < nov);
    }

    #[test]
    fn parses_iso_and_day_first_dates() {
        assert_eq!(parse_reg_date(Some("2025-01-15")), Some(date(2025, 1, 15)));
        assert_eq!(parse_reg_date(Some("15/01/2025")), Some(date(2025, 1, 15)));
        assert_eq!(parse_reg_date(Some("January 15")), None);
        assert_eq!(parse_reg_date(Some("")), None);
        assert_eq!(parse_reg_date(None), None);
    }
}
