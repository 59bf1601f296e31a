//! Unit-based portfolio NAV engine
//!
//! The portfolio is treated like a fund of its own: every cash flow buys or
//! redeems "portfolio units" at the portfolio's current NAV, so the ratio of
//! market value to portfolio units moves only with fund prices.
//!
//! The walk visits each relevant date in ascending order and, for each date:
//!
//! 1. values yesterday's closing holdings at today's prices to get today's NAV,
//! 2. records `(date, nav)`,
//! 3. applies today's transactions (end-of-day execution).
//!
//! While nothing is held, the NAV stays frozen at the last computed value and
//! the next buy re-enters at that frozen NAV.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use core_kernel::FundId;

use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::price_table::PriceTable;
use crate::series::{NavPoint, NavSeries};
use crate::transaction::Transaction;

/// Computes the NAV series of a portfolio
///
/// # Arguments
///
/// * `transactions` - Buys and sells; grouped by date internally, same-date order is kept
/// * `prices` - Fund prices and the horizon date
/// * `base_nav` - NAV reported on the first relevant date
///
/// # Errors
///
/// * `NavError::Input` - no transactions, non-positive base NAV, or no relevant dates
/// * `NavError::MissingPrice` - a held fund has no price on a relevant date
/// * `NavError::InsufficientUnits` - a sell exceeds the units held
/// * `NavError::DegenerateValue` - holdings are valued at zero while portfolio units are outstanding,
///   or a sell leaves holdings with no portfolio units behind them
/// * `NavError::Overflow` - a value or unit count exceeds the decimal range
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::FundId;
/// use domain_nav::{compute_portfolio_nav, PriceTable, Transaction};
/// use rust_decimal_macros::dec;
///
/// let mf1 = FundId::new("MF1").unwrap();
/// let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
///
/// let txns = vec![Transaction::buy(mf1.clone(), jan1, dec!(100), dec!(100)).unwrap()];
/// let prices = PriceTable::builder(jan2)
///     .with_price(jan1, mf1.clone(), dec!(100))
///     .with_price(jan2, mf1, dec!(110))
///     .build()
///     .unwrap();
///
/// let series = compute_portfolio_nav(&txns, &prices, dec!(1000)).unwrap();
/// assert_eq!(series.latest().unwrap().nav, dec!(1100));
/// ```
pub fn compute_portfolio_nav(
    transactions: &[Transaction],
    prices: &PriceTable,
    base_nav: Decimal,
) -> NavResult<NavSeries> {
    if base_nav <= Decimal::ZERO {
        return Err(NavError::input(format!("base NAV must be positive, got {}", base_nav)));
    }

    let by_date = group_by_date(transactions)?;
    let dates = relevant_dates(&by_date, prices)?;

    let skipped: usize = by_date
        .iter()
        .filter(|(date, _)| **date > prices.horizon_date())
        .map(|(_, txns)| txns.len())
        .sum();
    if skipped > 0 {
        warn!(
            skipped,
            horizon = %prices.horizon_date(),
            "Transactions dated after the horizon are not applied"
        );
    }

    let mut state = PortfolioState::new(base_nav);
    let mut points = Vec::with_capacity(dates.len());

    for date in dates.iter().copied() {
        let nav = state.nav_for(date, prices)?;
        points.push(NavPoint { date, nav });
        debug!(%date, %nav, portfolio_units = %state.portfolio_units, "NAV recorded");

        if let Some(txns) = by_date.get(&date) {
            for txn in txns {
                state.apply(txn, nav)?;
            }
        }
    }

    let series = NavSeries::from_sorted(points);
    info!(
        transactions = transactions.len(),
        relevant_dates = series.len(),
        final_nav = %series.latest().map(|p| p.nav).unwrap_or(base_nav),
        "Portfolio NAV computed"
    );

    Ok(series)
}

/// NAV engine bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct NavEngine {
    config: NavConfig,
}

impl NavEngine {
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Computes the NAV series using the configured base NAV
    pub fn compute(&self, transactions: &[Transaction], prices: &PriceTable) -> NavResult<NavSeries> {
        compute_portfolio_nav(transactions, prices, self.config.base_nav)
    }

    /// Computes the NAV series rounded to the configured display precision
    pub fn compute_for_display(
        &self,
        transactions: &[Transaction],
        prices: &PriceTable,
    ) -> NavResult<NavSeries> {
        self.compute(transactions, prices)
            .map(|series| series.rounded(self.config.display_precision))
    }
}

/// Groups transactions by date, keeping the given order within a date
fn group_by_date(transactions: &[Transaction]) -> NavResult<BTreeMap<NaiveDate, Vec<&Transaction>>> {
    if transactions.is_empty() {
        return Err(NavError::input("No transactions provided"));
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions {
        by_date.entry(txn.date()).or_default().push(txn);
    }
    Ok(by_date)
}

/// Dates from the first transaction up to the horizon, drawn from price and transaction dates
fn relevant_dates(
    by_date: &BTreeMap<NaiveDate, Vec<&Transaction>>,
    prices: &PriceTable,
) -> NavResult<Vec<NaiveDate>> {
    let first = by_date
        .keys()
        .next()
        .copied()
        .ok_or_else(|| NavError::input("No transactions provided"))?;
    let horizon = prices.horizon_date();

    let dates: BTreeSet<NaiveDate> = prices
        .dates()
        .chain(by_date.keys().copied())
        .filter(|d| first <= *d && *d <= horizon)
        .collect();

    if dates.is_empty() {
        return Err(NavError::input(format!(
            "No relevant dates between first transaction {} and horizon {}",
            first, horizon
        )));
    }

    Ok(dates.into_iter().collect())
}

/// Carried state of the date-ordered walk
#[derive(Debug, Clone)]
struct PortfolioState {
    holdings: BTreeMap<FundId, Decimal>,
    portfolio_units: Decimal,
    last_known_nav: Decimal,
}

impl PortfolioState {
    fn new(base_nav: Decimal) -> Self {
        Self {
            holdings: BTreeMap::new(),
            portfolio_units: Decimal::ZERO,
            last_known_nav: base_nav,
        }
    }

    fn is_empty(&self) -> bool {
        self.portfolio_units.is_zero()
    }

    /// Market value of current holdings at the date's prices
    fn portfolio_value(&self, date: NaiveDate, prices: &PriceTable) -> NavResult<Decimal> {
        self.holdings
            .iter()
            .filter(|(_, units)| !units.is_zero())
            .try_fold(Decimal::ZERO, |value, (fund, units)| {
                units
                    .checked_mul(prices.require_price(date, fund)?)
                    .and_then(|held| value.checked_add(held))
                    .ok_or(NavError::Overflow { date })
            })
    }

    /// NAV for the date, from holdings before the date's transactions
    fn nav_for(&mut self, date: NaiveDate, prices: &PriceTable) -> NavResult<Decimal> {
        if self.is_empty() {
            return Ok(self.last_known_nav);
        }

        let value = self.portfolio_value(date, prices)?;
        if value.is_zero() {
            return Err(NavError::DegenerateValue {
                date,
                portfolio_units: self.portfolio_units,
            });
        }

        let nav = value
            .checked_div(self.portfolio_units)
            .ok_or(NavError::Overflow { date })?;
        self.last_known_nav = nav;
        Ok(nav)
    }

    /// Applies one transaction at the date's NAV
    fn apply(&mut self, txn: &Transaction, nav: Decimal) -> NavResult<()> {
        let overflow = || NavError::Overflow { date: txn.date() };
        let held = self.holdings.get(txn.fund()).copied().unwrap_or(Decimal::ZERO);
        let updated = held.checked_add(txn.signed_units()).ok_or_else(overflow)?;
        if updated < Decimal::ZERO {
            return Err(NavError::InsufficientUnits {
                transaction_id: txn.id(),
                date: txn.date(),
                fund: txn.fund().clone(),
                held,
                requested: txn.units(),
            });
        }

        let was_empty = self.is_empty();
        if updated.is_zero() {
            self.holdings.remove(txn.fund());
        } else {
            self.holdings.insert(txn.fund().clone(), updated);
        }

        if was_empty {
            // Re-entry (or first buy) is priced at the frozen NAV
            self.portfolio_units = txn
                .cash_value()?
                .checked_div(self.last_known_nav)
                .ok_or_else(overflow)?;
            debug!(
                transaction = %txn.id(),
                fund = %txn.fund(),
                nav = %self.last_known_nav,
                portfolio_units = %self.portfolio_units,
                "Portfolio re-entered"
            );
        } else {
            let issued = txn.signed_cash_value()?.checked_div(nav).ok_or_else(overflow)?;
            self.portfolio_units = self.portfolio_units.checked_add(issued).ok_or_else(overflow)?;
        }

        if !self.holdings.is_empty() && self.portfolio_units <= Decimal::ZERO {
            // A sell priced far above the table can redeem more than the portfolio is worth
            return Err(NavError::DegenerateValue {
                date: txn.date(),
                portfolio_units: self.portfolio_units,
            });
        }

        if self.holdings.is_empty() {
            self.portfolio_units = Decimal::ZERO;
            debug!(
                transaction = %txn.id(),
                date = %txn.date(),
                frozen_nav = %self.last_known_nav,
                "Portfolio fully withdrawn"
            );
        }

        debug!(
            transaction = %txn.id(),
            fund = %txn.fund(),
            kind = ?txn.kind(),
            units = %txn.units(),
            portfolio_units = %self.portfolio_units,
            "Transaction applied"
        );
        Ok(())
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
    fn test_state_starts_empty_at_base() {
        let mut state = PortfolioState::new(dec!(1000));
        let prices = PriceTable::builder(day(1)).build().unwrap();

        assert!(state.is_empty());
        assert_eq!(state.nav_for(day(1), &prices).unwrap(), dec!(1000));
    }

    #[test]
    fn test_first_buy_issues_units_at_base() {
        let mut state = PortfolioState::new(dec!(1000));
        let txn = Transaction::buy(fund("MF1"), day(1), dec!(100), dec!(100)).unwrap();

        state.apply(&txn, dec!(1000)).unwrap();

        assert_eq!(state.portfolio_units, dec!(10));
        assert_eq!(state.holdings.get(&fund("MF1")), Some(&dec!(100)));
    }

    #[test]
    fn test_sell_redeems_units_at_nav() {
        let mut state = PortfolioState::new(dec!(1000));
        let buy = Transaction::buy(fund("MF1"), day(1), dec!(100), dec!(100)).unwrap();
        let sell = Transaction::sell(fund("MF1"), day(2), dec!(50), dec!(110)).unwrap();

        state.apply(&buy, dec!(1000)).unwrap();
        state.apply(&sell, dec!(1100)).unwrap();

        assert_eq!(state.portfolio_units, dec!(5));
        assert_eq!(state.holdings.get(&fund("MF1")), Some(&dec!(50)));
    }

    #[test]
    fn test_full_sell_empties_state() {
        let mut state = PortfolioState::new(dec!(1000));
        let buy = Transaction::buy(fund("MF1"), day(1), dec!(3), dec!(100)).unwrap();
        let sell = Transaction::sell(fund("MF1"), day(2), dec!(3), dec!(107)).unwrap();

        state.apply(&buy, dec!(1000)).unwrap();
        state.last_known_nav = dec!(1070);
        state.apply(&sell, dec!(1070)).unwrap();

        assert!(state.is_empty());
        assert!(state.holdings.is_empty());
        assert_eq!(state.last_known_nav, dec!(1070));
    }

    #[test]
    fn test_oversell_is_rejected() {
        let mut state = PortfolioState::new(dec!(1000));
        let buy = Transaction::buy(fund("MF1"), day(1), dec!(10), dec!(100)).unwrap();
        let sell = Transaction::sell(fund("MF1"), day(2), dec!(11), dec!(100)).unwrap();

        state.apply(&buy, dec!(1000)).unwrap();
        let err = state.apply(&sell, dec!(1000)).unwrap_err();

        assert!(matches!(err, NavError::InsufficientUnits { held, requested, .. }
            if held == dec!(10) && requested == dec!(11)));
    }

    #[test]
    fn test_zero_value_with_outstanding_units_is_degenerate() {
        let mut state = PortfolioState::new(dec!(1000));
        state.portfolio_units = dec!(5);
        let prices = PriceTable::builder(day(1)).build().unwrap();

        let err = state.nav_for(day(1), &prices).unwrap_err();
        assert_eq!(
            err,
            NavError::DegenerateValue {
                date: day(1),
                portfolio_units: dec!(5)
            }
        );
    }

    #[test]
    fn test_overpriced_sell_is_degenerate() {
        let mut state = PortfolioState::new(dec!(1000));
        let buy = Transaction::buy(fund("MF1"), day(1), dec!(10), dec!(100)).unwrap();
        let sell = Transaction::sell(fund("MF1"), day(2), dec!(5), dec!(300)).unwrap();

        state.apply(&buy, dec!(1000)).unwrap();
        let err = state.apply(&sell, dec!(1000)).unwrap_err();

        assert!(matches!(err, NavError::DegenerateValue { portfolio_units, .. }
            if portfolio_units == dec!(-0.5)));
    }

    #[test]
    fn test_relevant_dates_include_transaction_dates() {
        let txns = vec![
            Transaction::buy(fund("MF1"), day(2), dec!(1), dec!(1)).unwrap(),
            Transaction::buy(fund("MF1"), day(4), dec!(1), dec!(1)).unwrap(),
        ];
        let by_date = group_by_date(&txns).unwrap();
        let prices = PriceTable::builder(day(5))
            .with_price(day(1), fund("MF1"), dec!(1))
            .with_price(day(3), fund("MF1"), dec!(1))
            .with_price(day(6), fund("MF1"), dec!(1))
            .build()
            .unwrap();

        let dates = relevant_dates(&by_date, &prices).unwrap();
        assert_eq!(dates, vec![day(2), day(3), day(4)]);
    }

    #[test]
    fn test_group_by_date_keeps_same_day_order() {
        let txns = vec![
            Transaction::buy(fund("MF2"), day(3), dec!(1), dec!(1)).unwrap(),
            Transaction::buy(fund("MF1"), day(1), dec!(1), dec!(1)).unwrap(),
            Transaction::sell(fund("MF2"), day(3), dec!(1), dec!(1)).unwrap(),
        ];

        let by_date = group_by_date(&txns).unwrap();
        let day3: Vec<_> = by_date[&day(3)].iter().map(|t| t.id()).collect();
        assert_eq!(day3, vec![txns[0].id(), txns[2].id()]);
        assert_eq!(by_date.keys().next(), Some(&day(1)));
    }
}
