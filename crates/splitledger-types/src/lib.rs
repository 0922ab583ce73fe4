//! # splitledger-types
//!
//! Shared types, errors, and configuration for the **SplitLedger** debt
//! ledger.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PartyId`], [`GroupId`], [`TransactionId`]
//! - **Money model**: [`Amount`], [`CurrencyTag`], [`NetPosition`], [`BalanceSnapshot`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`SplitledgerError`] with `SL_ERR_` prefix codes
//! - **Constants**: id prefixes and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod currency;
pub mod error;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use splitledger_types::{PartyId, GroupId, SplitledgerError, ...};

pub use balance::*;
pub use config::*;
pub use currency::*;
pub use error::*;
pub use ids::*;

// Constants are accessed via `splitledger_types::constants::FOO`
// (not re-exported to avoid name collisions).
