//! Calendar helpers.
//!
//! All day keys are UTC calendar dates. Daily rollover, the collected-dates
//! set, and the `lastUpdated` field all key off the same UTC date so a
//! record written on one machine reads consistently on another.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Today's UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// UTC calendar date of an epoch-milliseconds timestamp.
pub fn date_of_epoch_ms(epoch_ms: u64) -> NaiveDate {
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// Days remaining in the year, counting from `date` to December 31.
pub fn days_left_in_year(date: NaiveDate) -> u32 {
    let end_of_year = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    end_of_year.signed_duration_since(date).num_days().max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_of_epoch_ms_is_utc() {
        // 2026-02-13 23:31:30 UTC
        assert_eq!(
            date_of_epoch_ms(1_771_025_490_000),
            NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()
        );
    }

    #[test]
    fn days_left_counts_to_december_31() {
        let nye = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(days_left_in_year(nye), 0);

        let first = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(days_left_in_year(first), 364);

        let leap_first = NaiveDate::from_ymd_opt(2028, 1, 1).unwrap();
        assert_eq!(days_left_in_year(leap_first), 365);
    }
}
