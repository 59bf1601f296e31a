//! Portfolio NAV series
//!
//! The ordered output of the NAV engine: one `(date, nav)` point per
//! relevant date, strictly ascending by date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// NAV of the portfolio on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPoint {
    pub date: NaiveDate,
    pub nav: Decimal,
}

/// NAV history of a portfolio, ascending by date
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavSeries {
    points: Vec<NavPoint>,
}

impl NavSeries {
    /// Wraps points that are already strictly ascending by date
    pub(crate) fn from_sorted(points: Vec<NavPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[NavPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavPoint> {
        self.points.iter()
    }

    /// Gets the earliest point
    pub fn first(&self) -> Option<&NavPoint> {
        self.points.first()
    }

    /// Gets the latest point
    pub fn latest(&self) -> Option<&NavPoint> {
        self.points.last()
    }

    /// Gets the point for a specific date
    pub fn at_date(&self, date: NaiveDate) -> Option<&NavPoint> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| &self.points[idx])
    }

    /// All dates in the series, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Calculates the return between two dates in the series
    ///
    /// Returns `None` if either date is absent.
    pub fn calculate_return(&self, from: NaiveDate, to: NaiveDate) -> Option<Decimal> {
        let start = self.at_date(from)?;
        let end = self.at_date(to)?;

        if start.nav.is_zero() {
            return None;
        }

        Some((end.nav - start.nav) / start.nav)
    }

    /// Return from the first to the latest point
    pub fn total_return(&self) -> Option<Decimal> {
        let start = self.first()?;
        let end = self.latest()?;
        self.calculate_return(start.date, end.date)
    }

    /// Copy with every NAV rounded to `dp` decimal places, for display
    pub fn rounded(&self, dp: u32) -> NavSeries {
        NavSeries {
            points: self
                .points
                .iter()
                .map(|p| NavPoint {
                    date: p.date,
                    nav: p.nav.round_dp(dp),
                })
                .collect(),
        }
    }

    /// Plain `(date, nav)` pairs
    pub fn into_pairs(self) -> Vec<(NaiveDate, Decimal)> {
        self.points.into_iter().map(|p| (p.date, p.nav)).collect()
    }
}

impl IntoIterator for NavSeries {
    type Item = NavPoint;
    type IntoIter = std::vec::IntoIter<NavPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a NavSeries {
    type Item = &'a NavPoint;
    type IntoIter = std::slice::Iter<'a, NavPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
