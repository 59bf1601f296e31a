//! Portfolio NAV Domain
//!
//! This crate computes a synthetic Net Asset Value series for a multi-fund
//! portfolio from its buy/sell history and historical fund prices, using the
//! unit-based method that mutual funds use to report their own NAV.
//!
//! # Key Concepts
//!
//! - **Transaction**: A buy or sell of fund units at the fund's price
//! - **Price Table**: Per-date fund prices plus the valuation horizon
//! - **Portfolio Units**: Units of the portfolio itself, issued and redeemed
//!   at the portfolio NAV whenever cash flows in or out
//! - **NAV Series**: Portfolio value per portfolio unit, one point per relevant date
//!
//! # Cash-flow Neutrality
//!
//! Deposits and withdrawals change portfolio units, not NAV:
//! - First buy: ₹10,000 at base NAV 1000 issues 10 portfolio units
//! - Funds rise 10%: value ₹11,000, NAV 1100
//! - Second buy: ₹11,000 at NAV 1100 issues 10 more units, NAV still 1100

pub mod transaction;
pub mod price_table;
pub mod engine;
pub mod series;
pub mod config;
pub mod error;

pub use transaction::{Transaction, TransactionKind};
pub use price_table::{FundPrice, PriceTable, PriceTableBuilder};
pub use engine::{compute_portfolio_nav, NavEngine};
pub use series::{NavPoint, NavSeries};
pub use config::NavConfig;
pub use error::{NavError, NavResult};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// NAV reported on the first relevant date unless configured otherwise
pub const DEFAULT_BASE_NAV: Decimal = dec!(1000);

/// Decimal places used when a NAV is rounded for display
pub const NAV_DISPLAY_PRECISION: u32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_nav() {
        assert_eq!(DEFAULT_BASE_NAV, dec!(1000));
    }
}
