//! NAV domain errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{FundId, TransactionId};

/// Errors that can occur while building inputs or computing a portfolio NAV series
///
/// None of these are recovered inside the engine: each aborts the
/// computation for the portfolio being valued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// No transactions, non-positive base NAV, or no relevant dates in range
    #[error("Input error: {0}")]
    Input(String),

    #[error("Missing price for fund {fund} on {date}")]
    MissingPrice { date: NaiveDate, fund: FundId },

    /// Portfolio value and portfolio units have fallen out of step
    #[error("Degenerate portfolio on {date}: {portfolio_units} portfolio units outstanding against the held value")]
    DegenerateValue {
        date: NaiveDate,
        portfolio_units: Decimal,
    },

    /// A value exceeded the decimal range
    #[error("Arithmetic overflow on {date}")]
    Overflow { date: NaiveDate },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Insufficient units of fund {fund} for transaction {transaction_id} on {date}: held {held}, requested {requested}")]
    InsufficientUnits {
        transaction_id: TransactionId,
        date: NaiveDate,
        fund: FundId,
        held: Decimal,
        requested: Decimal,
    },
}

impl NavError {
    pub fn input(message: impl Into<String>) -> Self {
        NavError::Input(message.into())
    }
}

/// Result alias for the NAV domain
pub type NavResult<T> = Result<T, NavError>;
