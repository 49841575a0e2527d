//! GSA fiscal year lookup.

use chrono::{Datelike, NaiveDate};

/// First month of the federal fiscal year.
const FISCAL_YEAR_START_MONTH: u32 = 10;

/// Returns the GSA fiscal year a date falls in.
///
/// The fiscal year starts on 1 October, so FY2026 runs from
/// 1 October 2025 to 30 September 2026.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::gsa_fiscal_year;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// assert_eq!(gsa_fiscal_year(date), 2026);
/// ```
pub fn gsa_fiscal_year(date: NaiveDate) -> i32 {
    if date.month() >= FISCAL_YEAR_START_MONTH {
        date.year() + 1
    } else {
        date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_september_is_same_year() {
        assert_eq!(gsa_fiscal_year(date(2026, 9, 30)), 2026);
    }

    #[test]
    fn test_october_starts_next_year() {
        assert_eq!(gsa_fiscal_year(date(2026, 10, 1)), 2027);
        assert_eq!(gsa_fiscal_year(date(2026, 12, 31)), 2027);
    }

    #[test]
    fn test_january_is_same_year() {
        assert_eq!(gsa_fiscal_year(date(2026, 1, 1)), 2026);
    }
}
