//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for NAV engine tests. The reference
//! portfolio is the two-fund example worked through in the crate docs:
//! a buy of MF1 on Jan 1 and a buy of MF2 on Jan 2, valued to Jan 4.

use chrono::NaiveDate;
use core_kernel::FundId;
use domain_nav::{PriceTable, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for fund codes
pub struct FundFixtures;

impl FundFixtures {
    pub fn mf1() -> FundId {
        FundId::new("MF1").expect("valid fund code")
    }

    pub fn mf2() -> FundId {
        FundId::new("MF2").expect("valid fund code")
    }

    pub fn mf3() -> FundId {
        FundId::new("MF3").expect("valid fund code")
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Day `day` of January 2024
    pub fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid January date")
    }

    /// `offset` days after Jan 1 2024
    pub fn day(offset: u64) -> NaiveDate {
        Self::jan(1) + chrono::Days::new(offset)
    }
}

/// The two-fund reference portfolio
pub struct ReferencePortfolio;

impl ReferencePortfolio {
    pub fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::buy(FundFixtures::mf1(), DateFixtures::jan(1), dec!(100), dec!(100))
                .expect("valid transaction"),
            Transaction::buy(FundFixtures::mf2(), DateFixtures::jan(2), dec!(100), dec!(110))
                .expect("valid transaction"),
        ]
    }

    pub fn prices() -> PriceTable {
        let (mf1, mf2) = (FundFixtures::mf1(), FundFixtures::mf2());
        PriceTable::builder(DateFixtures::jan(4))
            .with_price(DateFixtures::jan(1), mf1.clone(), dec!(100))
            .with_price(DateFixtures::jan(1), mf2.clone(), dec!(100))
            .with_price(DateFixtures::jan(2), mf1.clone(), dec!(110))
            .with_price(DateFixtures::jan(2), mf2.clone(), dec!(110))
            .with_price(DateFixtures::jan(3), mf1.clone(), dec!(121))
            .with_price(DateFixtures::jan(3), mf2.clone(), dec!(132))
            .with_price(DateFixtures::jan(4), mf1, dec!(110))
            .with_price(DateFixtures::jan(4), mf2, dec!(110))
            .build()
            .expect("valid price table")
    }

    pub fn expected_navs() -> Vec<(NaiveDate, Decimal)> {
        vec![
            (DateFixtures::jan(1), dec!(1000)),
            (DateFixtures::jan(2), dec!(1100)),
            (DateFixtures::jan(3), dec!(1265)),
            (DateFixtures::jan(4), dec!(1100)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_offsets() {
        assert_eq!(DateFixtures::day(0), DateFixtures::jan(1));
        assert_eq!(DateFixtures::day(31), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_reference_prices_cover_expected_dates() {
        let prices = ReferencePortfolio::prices();
        let dates: Vec<_> = prices.dates().collect();
        let expected: Vec<_> = ReferencePortfolio::expected_navs().into_iter().map(|(d, _)| d).collect();
        assert_eq!(dates, expected);
    }
}
