//! Historical fund prices
//!
//! A `PriceTable` maps each date to the per-unit price of every fund quoted
//! on that date, and carries the horizon date bounding the valuation range.
//! Tables are assembled with a `PriceTableBuilder` and are immutable once built.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::FundId;

use crate::error::{NavError, NavResult};

/// A single fund price point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPrice {
    /// Valuation date
    pub date: NaiveDate,
    /// Fund being priced
    pub fund: FundId,
    /// Price per unit
    pub price: Decimal,
}

impl FundPrice {
    pub fn new(date: NaiveDate, fund: FundId, price: Decimal) -> Self {
        Self { date, fund, price }
    }
}

/// Per-date, per-fund price lookup bounded by a horizon date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    prices: BTreeMap<NaiveDate, HashMap<FundId, Decimal>>,
    horizon_date: NaiveDate,
}

impl PriceTable {
    /// Starts a builder for a table valued up to `horizon_date`
    pub fn builder(horizon_date: NaiveDate) -> PriceTableBuilder {
        PriceTableBuilder::new(horizon_date)
    }

    /// Builds a table from price records
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidPrice` if any price is not positive
    pub fn from_records<I>(horizon_date: NaiveDate, records: I) -> NavResult<Self>
    where
        I: IntoIterator<Item = FundPrice>,
    {
        PriceTableBuilder::new(horizon_date).extend(records).build()
    }

    /// Last date for which a NAV should be produced
    pub fn horizon_date(&self) -> NaiveDate {
        self.horizon_date
    }

    /// Gets the price of a fund on a date, if quoted
    pub fn price(&self, date: NaiveDate, fund: &FundId) -> Option<Decimal> {
        self.prices.get(&date)?.get(fund).copied()
    }

    /// Gets the price of a fund on a date, failing if it is not quoted
    pub fn require_price(&self, date: NaiveDate, fund: &FundId) -> NavResult<Decimal> {
        self.price(date, fund).ok_or_else(|| NavError::MissingPrice {
            date,
            fund: fund.clone(),
        })
    }

    /// All dates with at least one price, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.prices.keys().copied()
    }

    /// Funds quoted on a date, in code order
    pub fn funds_on(&self, date: NaiveDate) -> Vec<&FundId> {
        let mut funds: Vec<&FundId> = self
            .prices
            .get(&date)
            .map(|quotes| quotes.keys().collect())
            .unwrap_or_default();
        funds.sort();
        funds
    }

    /// Number of dates with at least one price
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Builder for `PriceTable`
///
/// Later entries for the same date and fund replace earlier ones.
#[derive(Debug, Clone)]
pub struct PriceTableBuilder {
    prices: BTreeMap<NaiveDate, HashMap<FundId, Decimal>>,
    horizon_date: NaiveDate,
}

impl PriceTableBuilder {
    pub fn new(horizon_date: NaiveDate) -> Self {
        Self {
            prices: BTreeMap::new(),
            horizon_date,
        }
    }

    /// Adds a price for a fund on a date
    pub fn with_price(mut self, date: NaiveDate, fund: FundId, price: Decimal) -> Self {
        self.prices.entry(date).or_default().insert(fund, price);
        self
    }

    /// Adds a price record
    pub fn with_record(self, record: FundPrice) -> Self {
        self.with_price(record.date, record.fund, record.price)
    }

    /// Adds many price records
    pub fn extend<I>(self, records: I) -> Self
    where
        I: IntoIterator<Item = FundPrice>,
    {
        records.into_iter().fold(self, Self::with_record)
    }

    /// Validates and builds the table
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidPrice` if any price is not positive
    pub fn build(self) -> NavResult<PriceTable> {
        for (date, quotes) in &self.prices {
            if let Some((fund, price)) = quotes.iter().find(|(_, price)| **price <= Decimal::ZERO) {
                return Err(NavError::InvalidPrice(format!(
                    "price of {} on {} must be positive, got {}",
                    fund, date, price
                )));
            }
        }

        Ok(PriceTable {
            prices: self.prices,
            horizon_date: self.horizon_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fund(code: &str) -> FundId {
        FundId::new(code).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_lookup() {
        let table = PriceTable::builder(day(2))
            .with_price(day(1), fund("MF1"), dec!(100))
            .with_price(day(2), fund("MF1"), dec!(110))
            .build()
            .unwrap();

        assert_eq!(table.price(day(2), &fund("MF1")), Some(dec!(110)));
        assert_eq!(table.price(day(2), &fund("MF2")), None);
        assert_eq!(table.price(day(3), &fund("MF1")), None);
    }

    #[test]
    fn test_require_price_reports_missing() {
        let table = PriceTable::builder(day(1)).build().unwrap();

        let err = table.require_price(day(1), &fund("MF1")).unwrap_err();
        assert_eq!(
            err,
            NavError::MissingPrice {
                date: day(1),
                fund: fund("MF1")
            }
        );
    }

    #[test]
    fn test_dates_are_sorted() {
        let table = PriceTable::builder(day(9))
            .with_price(day(5), fund("MF1"), dec!(1))
            .with_price(day(2), fund("MF1"), dec!(1))
            .with_price(day(7), fund("MF1"), dec!(1))
            .build()
            .unwrap();

        let dates: Vec<_> = table.dates().collect();
        assert_eq!(dates, vec![day(2), day(5), day(7)]);
    }

    #[test]
    fn test_later_entry_wins() {
        let table = PriceTable::builder(day(1))
            .with_price(day(1), fund("MF1"), dec!(100))
            .with_price(day(1), fund("MF1"), dec!(101))
            .build()
            .unwrap();

        assert_eq!(table.price(day(1), &fund("MF1")), Some(dec!(101)));
    }

    #[test]
    fn test_rejects_zero_price() {
        let result = PriceTable::builder(day(1))
            .with_price(day(1), fund("MF1"), Decimal::ZERO)
            .build();

        assert!(matches!(result, Err(NavError::InvalidPrice(_))));
    }

    #[test]
    fn test_funds_on_sorted() {
        let table = PriceTable::builder(day(1))
            .with_price(day(1), fund("MF2"), dec!(1))
            .with_price(day(1), fund("MF1"), dec!(1))
            .build()
            .unwrap();

        let funds: Vec<&str> = table.funds_on(day(1)).into_iter().map(FundId::as_str).collect();
        assert_eq!(funds, vec!["MF1", "MF2"]);
        assert!(table.funds_on(day(2)).is_empty());
    }
}
