//! Property-based integration tests for the budgeting period type.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{Datelike, NaiveDate};
use ledgerbook_core::budgets::Period;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// Generates a random valid period.
fn arb_period() -> impl Strategy<Value = Period> {
    (Period::MIN_YEAR..=Period::MAX_YEAR, 1u32..=12)
        .prop_map(|(year, month)| Period::new(year, month).expect("generated period is valid"))
}

/// Generates a random valid date. Days stop at 28 so every (year, month)
/// combination stays representable.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (Period::MIN_YEAR..=Period::MAX_YEAR, 1u32..=12, 1u32..=28).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day).expect("generated date is valid")
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Formatting a period and parsing it back yields the same period.
    #[test]
    fn prop_display_parse_round_trip(period in arb_period()) {
        let parsed: Period = period.to_string().parse().unwrap();
        prop_assert_eq!(parsed, period);
    }

    /// The canonical form is always exactly "YYYY-MM".
    #[test]
    fn prop_display_is_canonical(period in arb_period()) {
        let formatted = period.to_string();
        prop_assert_eq!(formatted.len(), 7);
        prop_assert_eq!(&formatted[4..5], "-");
    }

    /// The JSON wire form is the canonical string and round-trips.
    #[test]
    fn prop_serde_round_trip(period in arb_period()) {
        let json = serde_json::to_string(&period).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", period));

        let back: Period = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, period);
    }

    /// Unpadded month strings are never accepted.
    #[test]
    fn prop_unpadded_month_rejected(
        year in Period::MIN_YEAR..=Period::MAX_YEAR,
        month in 1u32..=9,
    ) {
        let unpadded = format!("{:04}-{}", year, month);
        prop_assert!(unpadded.parse::<Period>().is_err());
    }

    /// The date range starts on the first of the month, ends on the first
    /// of the next month, and spans a plausible month length.
    #[test]
    fn prop_date_range_covers_one_month(period in arb_period()) {
        let (start, end) = period.date_range();

        prop_assert_eq!(start.day(), 1);
        prop_assert_eq!(end.day(), 1);
        prop_assert_eq!(Period::containing(start), period);

        let days = (end - start).num_days();
        prop_assert!((28..=31).contains(&days), "month length was {} days", days);
    }

    /// Every date falls inside the half-open range of its own period.
    #[test]
    fn prop_containing_brackets_date(date in arb_date()) {
        let period = Period::containing(date);
        let (start, end) = period.date_range();

        prop_assert!(start <= date && date < end);
    }

    /// Stepping back is compositional: going back a then b months lands on
    /// the same period as going back a + b months at once.
    #[test]
    fn prop_months_back_composes(
        year in 1200i32..=Period::MAX_YEAR,
        month in 1u32..=12,
        a in 0u32..=600,
        b in 0u32..=600,
    ) {
        let period = Period::new(year, month).unwrap();

        prop_assert_eq!(
            period.months_back(a).months_back(b),
            period.months_back(a + b)
        );
    }

    /// Stepping back never moves forward in time.
    #[test]
    fn prop_months_back_never_advances(period in arb_period(), months in 0u32..=1200) {
        prop_assert!(period.months_back(months) <= period);
    }

    /// Period ordering agrees with the calendar order of their start dates.
    #[test]
    fn prop_ordering_matches_calendar(a in arb_period(), b in arb_period()) {
        let starts_cmp = a.date_range().0.cmp(&b.date_range().0);
        prop_assert_eq!(a.cmp(&b), starts_cmp);
    }
}
