//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers provides type safety and prevents accidental
//! mixing of fund codes with other strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Identifier of a single transaction
///
/// Generated ids are UUID v7, so ids created later sort after earlier ones.
/// Displayed as `TXN-<uuid>`; parsing accepts the string with or without
/// the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    const PREFIX: &'static str = "TXN-";

    /// Creates a new time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid_str = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

/// Code identifying an underlying fund, e.g. `MF1` or `INF204K01EY0`
///
/// Fund codes come from the caller's own data, so unlike transaction
/// ids they are free-form strings. Surrounding whitespace is
/// trimmed and the empty code is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundId(String);

impl FundId {
    /// Creates a fund code, rejecting empty or blank input
    pub fn new(code: impl AsRef<str>) -> Result<Self, CoreError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(CoreError::validation("Fund code cannot be empty"));
        }
        Ok(Self(code.to_string()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FundId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FundId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FundId> for String {
    fn from(id: FundId) -> String {
        id.0
    }
}

impl AsRef<str> for FundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("TXN-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = TransactionId::new();
        let parsed: TransactionId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_fund_id_trims() {
        let fund = FundId::new("  MF1 ").unwrap();
        assert_eq!(fund.as_str(), "MF1");
    }

    #[test]
    fn test_fund_id_rejects_blank() {
        assert!(FundId::new("   ").is_err());
    }
}
