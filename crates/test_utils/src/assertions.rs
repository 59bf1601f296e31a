//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for NAV values and series that
//! give more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use domain_nav::NavSeries;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for NAVs that went through non-terminating decimal division
pub const NAV_TOLERANCE: Decimal = dec!(0.000000000001);

/// Asserts that two NAV values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_nav_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "NAVs differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a series matches expected `(date, nav)` pairs exactly
pub fn assert_series_eq(series: &NavSeries, expected: &[(NaiveDate, Decimal)]) {
    assert_eq!(
        series.len(),
        expected.len(),
        "Series length mismatch: actual dates={:?}",
        series.dates()
    );
    for (point, (date, nav)) in series.iter().zip(expected) {
        assert_eq!(point.date, *date, "Date mismatch");
        assert_eq!(point.nav, *nav, "On {}, expected NAV {} but got {}", date, nav, point.nav);
    }
}

/// Asserts that two series have the same dates and approximately equal NAVs
pub fn assert_series_approx_eq(actual: &NavSeries, expected: &NavSeries, tolerance: Decimal) {
    assert_eq!(actual.dates(), expected.dates(), "Series dates differ");
    for (a, e) in actual.iter().zip(expected.iter()) {
        let diff = (a.nav - e.nav).abs();
        assert!(
            diff <= tolerance,
            "On {}, NAVs differ by more than tolerance: actual={}, expected={}, diff={}",
            a.date,
            a.nav,
            e.nav,
            diff
        );
    }
}

/// Asserts that series dates are strictly ascending
pub fn assert_strictly_ascending(series: &NavSeries) {
    for pair in series.points().windows(2) {
        assert!(
            pair[0].date < pair[1].date,
            "Series dates not strictly ascending: {} then {}",
            pair[0].date,
            pair[1].date
        );
    }
}

/// Asserts that every NAV in a date range equals `nav`
pub fn assert_frozen_between(series: &NavSeries, from: NaiveDate, to: NaiveDate, nav: Decimal) {
    for point in series.iter().filter(|p| from <= p.date && p.date <= to) {
        assert_eq!(
            point.nav, nav,
            "Expected NAV frozen at {} on {}, got {}",
            nav, point.date, point.nav
        );
    }
}
