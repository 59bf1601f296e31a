//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating NAV engine inputs that
//! respect the domain invariants (positive units, positive prices).

use core_kernel::FundId;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating fund prices (1.00 to 999.99)
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..100000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating unit quantities (0.01 to 9999.99)
pub fn units_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating daily price paths of 2 to `max_len` days
pub fn price_path_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(price_strategy(), 2..=max_len.max(2))
}

/// Strategy for generating a fraction in (0, 1) with two decimal places
pub fn fraction_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating fund codes
pub fn fund_code_strategy() -> impl Strategy<Value = FundId> {
    "[A-Z]{2,4}[0-9]{0,3}".prop_map(|code| FundId::new(code).expect("generated code is non-empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prices_are_positive(price in price_strategy()) {
            prop_assert!(price > Decimal::ZERO);
        }

        #[test]
        fn units_are_positive(units in units_strategy()) {
            prop_assert!(units > Decimal::ZERO);
        }

        #[test]
        fn paths_have_at_least_two_days(path in price_path_strategy(10)) {
            prop_assert!(path.len() >= 2 && path.len() <= 10);
        }

        #[test]
        fn fractions_are_proper(f in fraction_strategy()) {
            prop_assert!(f > Decimal::ZERO && f < Decimal::ONE);
        }
    }
}
