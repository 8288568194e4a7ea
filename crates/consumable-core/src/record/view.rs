//! Read-only derived values for a record at a given date.
//!
//! Nothing here is cached or persisted; every call recomputes from the
//! stored record and the supplied `now`. Repeated calls with the same
//! inputs are idempotent, so a periodic refresh can fire as often as the
//! host likes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExpirationRecord;

/// Display values computed from a record and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedView {
    /// Days of service life left; never negative.
    pub remaining_days: u32,
    /// Days since the start date, clamped at zero for future start dates.
    pub elapsed_days: u32,
    /// Share of the service life consumed, in [0, 100], one decimal place.
    pub percent_used: f64,
    /// `start_date + duration_days`.
    pub due_date: NaiveDate,
    /// True once `now` reaches the due date.
    pub expired: bool,
}

/// Compute the derived view of `record` as of `now`.
///
/// Total for any valid record; never fails.
pub fn derive(record: &ExpirationRecord, now: NaiveDate) -> DerivedView {
    let elapsed_raw = (now - record.start_date).num_days();
    let duration = i64::from(record.duration_days);

    let remaining = (duration - elapsed_raw).max(0);
    let elapsed = elapsed_raw.max(0);
    // Percentage clamps the unclamped elapsed, so a future start date reads
    // as 0% and an overdue item as 100%.
    let percent = (elapsed_raw as f64 / duration as f64 * 100.0).clamp(0.0, 100.0);
    let due_date = record.due_date();

    DerivedView {
        remaining_days: remaining as u32,
        elapsed_days: elapsed as u32,
        percent_used: (percent * 10.0).round() / 10.0,
        due_date,
        expired: now >= due_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{reconcile::reconcile, PartialUpdate};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(duration: u32, start: NaiveDate) -> ExpirationRecord {
        ExpirationRecord::new(duration, start).unwrap()
    }

    #[test]
    fn fresh_record_on_start_date() {
        let view = derive(&record(30, date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(view.remaining_days, 30);
        assert_eq!(view.elapsed_days, 0);
        assert_eq!(view.percent_used, 0.0);
        assert_eq!(view.due_date, date(2024, 1, 31));
        assert!(!view.expired);
    }

    #[test]
    fn midlife_values() {
        let view = derive(&record(30, date(2024, 1, 1)), date(2024, 1, 16));
        assert_eq!(view.remaining_days, 15);
        assert_eq!(view.elapsed_days, 15);
        assert_eq!(view.percent_used, 50.0);
        assert!(!view.expired);
    }

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        // 7 of 30 days is 23.333...%
        let view = derive(&record(30, date(2024, 1, 1)), date(2024, 1, 8));
        assert_eq!(view.percent_used, 23.3);
    }

    #[test]
    fn expired_exactly_on_due_date() {
        let item = record(30, date(2024, 1, 1));
        assert!(!derive(&item, date(2024, 1, 30)).expired);
        assert!(derive(&item, date(2024, 1, 31)).expired);
        assert_eq!(derive(&item, date(2024, 1, 31)).remaining_days, 0);
    }

    #[test]
    fn long_past_due_date_clamps() {
        let view = derive(&record(30, date(2024, 1, 1)), date(2030, 1, 1));
        assert_eq!(view.remaining_days, 0);
        assert_eq!(view.percent_used, 100.0);
        assert!(view.expired);
    }

    #[test]
    fn future_start_date_clamps_elapsed_but_not_remaining() {
        let view = derive(&record(30, date(2024, 2, 1)), date(2024, 1, 1));
        assert_eq!(view.elapsed_days, 0);
        assert_eq!(view.percent_used, 0.0);
        // 31 days until the start plus the full 30-day life.
        assert_eq!(view.remaining_days, 61);
        assert!(!view.expired);
    }

    #[test]
    fn round_trip_with_reconcile() {
        let start = date(2024, 3, 10);
        let update = PartialUpdate::new()
            .with_duration(90)
            .with_start_date(start);
        let rec = reconcile(None, &update, start).unwrap();
        let view = derive(&rec, start);
        assert_eq!(view.elapsed_days, 0);
        assert_eq!(view.remaining_days, 90);
        assert!(!view.expired);
    }

    proptest! {
        #[test]
        fn derived_values_always_clamped(
            duration in 1u32..=1825,
            start_offset in -5000i64..=5000,
            now_offset in -5000i64..=5000,
        ) {
            let base = date(2024, 1, 1);
            let start = base + chrono::Duration::days(start_offset);
            let now = base + chrono::Duration::days(now_offset);
            let view = derive(&record(duration, start), now);

            prop_assert!((0.0..=100.0).contains(&view.percent_used));
            prop_assert_eq!(view.expired, now >= view.due_date);
            if view.expired {
                prop_assert_eq!(view.remaining_days, 0);
            }
            if now <= start {
                prop_assert_eq!(view.elapsed_days, 0);
                prop_assert_eq!(view.percent_used, 0.0);
            }
        }
    }
}
