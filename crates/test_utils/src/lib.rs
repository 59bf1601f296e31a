//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! portfolio NAV test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, fund codes, and the two-fund reference portfolio
//! - `builders`: Builder patterns for transaction lists and price tables
//! - `assertions`: Custom assertion helpers for NAV values and series
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber setup for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
