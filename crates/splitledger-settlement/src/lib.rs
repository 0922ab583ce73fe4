//! # splitledger-settlement
//!
//! **Settlement plane**: turns a group's pooled balances into a short list
//! of concrete payments that zero every balance.
//!
//! ## Architecture
//!
//! The settlement plane reads a [`splitledger_ledger::BalanceLedger`] and:
//! 1. Splits it into debtors, creditors and settled members
//! 2. Repeatedly pairs the largest debtor with the largest creditor
//! 3. Emits one [`SettlementProposal`] per pairing
//! 4. Reports an empty ledger or an unsettled residual as warnings
//!
//! Settlement is advisory: nothing here mutates a ledger unless the caller
//! explicitly applies a plan with [`apply_plan`] or
//! [`SettlementPlan::apply_to`].
//!
//! The greedy pairing emits at most `N - 1` proposals for `N` members with
//! a non-zero balance. It is a heuristic, not a guaranteed minimum.

pub mod conservation;
pub mod determinism;
pub mod engine;
pub mod group_settlement;
pub mod plan;
pub mod summary;

pub use conservation::{ConservationCheck, audit_group};
pub use determinism::{compute_plan_root, plan_root_hex, verify_plan_root};
pub use engine::{SettlementEngine, calculate_settlements};
pub use group_settlement::{apply_plan, settle_group};
pub use plan::{SettlementPlan, SettlementProposal, SettlementWarning};
pub use summary::{MemberSettlement, SettlementSummary};
