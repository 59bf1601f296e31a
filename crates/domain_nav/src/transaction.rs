//! Fund transactions
//!
//! A transaction records one buy or sell of a fund on a given date at the
//! fund's per-unit price. Transactions are validated on construction and
//! never change afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{FundId, TransactionId};

use crate::error::{NavError, NavResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Units bought; cash flows into the portfolio
    Buy,
    /// Units sold; cash flows out of the portfolio
    Sell,
}

impl TransactionKind {
    /// `+1` for a buy, `-1` for a sell
    pub fn sign(&self) -> Decimal {
        match self {
            TransactionKind::Buy => Decimal::ONE,
            TransactionKind::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

/// A buy or sell of one fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    fund: FundId,
    date: NaiveDate,
    kind: TransactionKind,
    units: Decimal,
    price: Decimal,
}

impl Transaction {
    /// Creates a new transaction
    ///
    /// # Arguments
    ///
    /// * `fund` - The fund bought or sold
    /// * `date` - The execution date
    /// * `kind` - Buy or sell
    /// * `units` - Number of fund units, must be positive
    /// * `price` - Per-unit price at execution, must be positive
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidTransaction` if `units` or `price` is not positive
    pub fn new(
        fund: FundId,
        date: NaiveDate,
        kind: TransactionKind,
        units: Decimal,
        price: Decimal,
    ) -> NavResult<Self> {
        if units <= Decimal::ZERO {
            return Err(NavError::InvalidTransaction(format!(
                "units must be positive, got {} for {} on {}",
                units, fund, date
            )));
        }
        if price <= Decimal::ZERO {
            return Err(NavError::InvalidTransaction(format!(
                "price must be positive, got {} for {} on {}",
                price, fund, date
            )));
        }

        Ok(Self {
            id: TransactionId::new(),
            fund,
            date,
            kind,
            units,
            price,
        })
    }

    /// Shorthand for a buy
    pub fn buy(fund: FundId, date: NaiveDate, units: Decimal, price: Decimal) -> NavResult<Self> {
        Self::new(fund, date, TransactionKind::Buy, units, price)
    }

    /// Shorthand for a sell
    pub fn sell(fund: FundId, date: NaiveDate, units: Decimal, price: Decimal) -> NavResult<Self> {
        Self::new(fund, date, TransactionKind::Sell, units, price)
    }

    /// Replaces the generated identifier
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn units(&self) -> Decimal {
        self.units
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Units with the sign of the transaction: positive for buys, negative for sells
    pub fn signed_units(&self) -> Decimal {
        self.kind.sign() * self.units
    }

    /// Monetary value of the transaction, always positive
    ///
    /// # Errors
    ///
    /// Returns `NavError::Overflow` if `units * price` exceeds the decimal range
    pub fn cash_value(&self) -> NavResult<Decimal> {
        self.units
            .checked_mul(self.price)
            .ok_or(NavError::Overflow { date: self.date })
    }

    /// Monetary value with the sign of the transaction
    pub fn signed_cash_value(&self) -> NavResult<Decimal> {
        Ok(self.kind.sign() * self.cash_value()?)
    }
}

/// Serialized form of a transaction; validated when converted back
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    #[serde(default = "TransactionId::new")]
    id: TransactionId,
    fund: FundId,
    date: NaiveDate,
    kind: TransactionKind,
    units: Decimal,
    price: Decimal,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = NavError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(record.fund, record.date, record.kind, record.units, record.price)
            .map(|txn| txn.with_id(record.id))
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            fund: txn.fund,
            date: txn.date,
            kind: txn.kind,
            units: txn.units,
            price: txn.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mf1() -> FundId {
        FundId::new("MF1").unwrap()
    }

    fn jan1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_buy_is_positive() {
        let txn = Transaction::buy(mf1(), jan1(), dec!(100), dec!(12.5)).unwrap();
        assert_eq!(txn.signed_units(), dec!(100));
        assert_eq!(txn.cash_value().unwrap(), dec!(1250));
        assert_eq!(txn.signed_cash_value().unwrap(), dec!(1250));
    }

    #[test]
    fn test_sell_is_negative() {
        let txn = Transaction::sell(mf1(), jan1(), dec!(40), dec!(12.5)).unwrap();
        assert_eq!(txn.signed_units(), dec!(-40));
        assert_eq!(txn.cash_value().unwrap(), dec!(500));
        assert_eq!(txn.signed_cash_value().unwrap(), dec!(-500));
    }

    #[test]
    fn test_rejects_zero_units() {
        let result = Transaction::buy(mf1(), jan1(), Decimal::ZERO, dec!(10));
        assert!(matches!(result, Err(NavError::InvalidTransaction(_))));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Transaction::sell(mf1(), jan1(), dec!(1), dec!(-10));
        assert!(matches!(result, Err(NavError::InvalidTransaction(_))));
    }

    #[test]
    fn test_cash_value_overflow_is_an_error() {
        let units = Decimal::new(1_000_000_000_000_000, 0);
        let price = Decimal::new(100_000_000_000_000, 0);
        let txn = Transaction::buy(mf1(), jan1(), units, price).unwrap();

        assert_eq!(txn.cash_value(), Err(NavError::Overflow { date: jan1() }));
        assert_eq!(txn.signed_cash_value(), Err(NavError::Overflow { date: jan1() }));
    }

    #[test]
    fn test_kind_sign() {
        assert_eq!(TransactionKind::Buy.sign(), Decimal::ONE);
        assert_eq!(TransactionKind::Sell.sign(), Decimal::NEGATIVE_ONE);
    }
}
