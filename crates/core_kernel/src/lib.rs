//! Core Kernel - Foundational types shared by the portfolio NAV crates
//!
//! This crate provides the small building blocks used across the workspace:
//! - Fund codes that key holdings and price tables
//! - Strongly-typed UUID identifiers for transactions
//! - The common error type

pub mod identifiers;
pub mod error;

pub use identifiers::{FundId, TransactionId};
pub use error::CoreError;
