//! Test Data Builders
//!
//! Provides builder patterns for constructing NAV engine inputs. Tests
//! describe a scenario as price paths plus trades and get back the
//! transaction list and price table the engine consumes.

use chrono::{Days, NaiveDate};
use core_kernel::FundId;
use domain_nav::{
    compute_portfolio_nav, FundPrice, NavResult, NavSeries, PriceTable, Transaction, TransactionKind,
    DEFAULT_BASE_NAV,
};
use rust_decimal::Decimal;

struct PendingTrade {
    fund: FundId,
    date: NaiveDate,
    kind: TransactionKind,
    units: Decimal,
    price: Option<Decimal>,
}

/// Builder for a portfolio scenario: fund prices plus trades
pub struct ScenarioBuilder {
    horizon: NaiveDate,
    prices: Vec<FundPrice>,
    trades: Vec<PendingTrade>,
}

impl ScenarioBuilder {
    /// Creates an empty scenario valued up to `horizon`
    pub fn new(horizon: NaiveDate) -> Self {
        Self {
            horizon,
            prices: Vec::new(),
            trades: Vec::new(),
        }
    }

    /// Sets the price of a fund on one date
    pub fn price(mut self, date: NaiveDate, fund: &FundId, price: Decimal) -> Self {
        self.prices.push(FundPrice::new(date, fund.clone(), price));
        self
    }

    /// Sets one price per consecutive day starting at `start`
    pub fn price_path(mut self, fund: &FundId, start: NaiveDate, path: &[Decimal]) -> Self {
        for (offset, price) in path.iter().enumerate() {
            let date = start + Days::new(offset as u64);
            self.prices.push(FundPrice::new(date, fund.clone(), *price));
        }
        self
    }

    /// Adds a buy at an explicit price
    pub fn buy(self, fund: &FundId, date: NaiveDate, units: Decimal, price: Decimal) -> Self {
        self.trade(fund, date, TransactionKind::Buy, units, Some(price))
    }

    /// Adds a sell at an explicit price
    pub fn sell(self, fund: &FundId, date: NaiveDate, units: Decimal, price: Decimal) -> Self {
        self.trade(fund, date, TransactionKind::Sell, units, Some(price))
    }

    /// Adds a buy at the fund's table price on that date
    pub fn buy_at_market(self, fund: &FundId, date: NaiveDate, units: Decimal) -> Self {
        self.trade(fund, date, TransactionKind::Buy, units, None)
    }

    /// Adds a sell at the fund's table price on that date
    pub fn sell_at_market(self, fund: &FundId, date: NaiveDate, units: Decimal) -> Self {
        self.trade(fund, date, TransactionKind::Sell, units, None)
    }

    fn trade(
        mut self,
        fund: &FundId,
        date: NaiveDate,
        kind: TransactionKind,
        units: Decimal,
        price: Option<Decimal>,
    ) -> Self {
        self.trades.push(PendingTrade {
            fund: fund.clone(),
            date,
            kind,
            units,
            price,
        });
        self
    }

    /// Builds the transaction list and price table
    ///
    /// # Panics
    ///
    /// Panics if a market-priced trade has no table price or any input is invalid
    pub fn build(self) -> (Vec<Transaction>, PriceTable) {
        let table = PriceTable::from_records(self.horizon, self.prices).expect("valid price table");

        let transactions = self
            .trades
            .into_iter()
            .map(|t| {
                let price = t.price.unwrap_or_else(|| {
                    table
                        .price(t.date, &t.fund)
                        .unwrap_or_else(|| panic!("no market price for {} on {}", t.fund, t.date))
                });
                Transaction::new(t.fund, t.date, t.kind, t.units, price).expect("valid transaction")
            })
            .collect();

        (transactions, table)
    }

    /// Builds the scenario and runs the engine at the default base NAV
    pub fn run(self) -> NavResult<NavSeries> {
        let (transactions, prices) = self.build();
        compute_portfolio_nav(&transactions, &prices, DEFAULT_BASE_NAV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DateFixtures, FundFixtures};
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_trades_use_table_price() {
        let mf1 = FundFixtures::mf1();
        let (txns, prices) = ScenarioBuilder::new(DateFixtures::jan(3))
            .price_path(&mf1, DateFixtures::jan(1), &[dec!(10), dec!(12), dec!(11)])
            .buy_at_market(&mf1, DateFixtures::jan(1), dec!(5))
            .sell_at_market(&mf1, DateFixtures::jan(2), dec!(2))
            .build();

        assert_eq!(txns[0].price(), dec!(10));
        assert_eq!(txns[1].price(), dec!(12));
        assert_eq!(txns[1].kind(), TransactionKind::Sell);
        assert_eq!(prices.price(DateFixtures::jan(3), &mf1), Some(dec!(11)));
    }
}
