//! Error types for SplitLedger.
//!
//! All errors use the `SL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Party / group registry errors
//! - 2xx: Balance ledger errors
//! - 3xx: Transaction log errors
//! - 4xx: Settlement errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{GroupId, PartyId};

/// Central error enum for all SplitLedger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitledgerError {
    // =================================================================
    // Registry Errors (1xx)
    // =================================================================
    /// No party with this id is registered.
    #[error("SL_ERR_100: Party not found: {0}")]
    PartyNotFound(PartyId),

    /// No group with this id is registered.
    #[error("SL_ERR_101: Group not found: {0}")]
    GroupNotFound(GroupId),

    /// A transaction inside a group involved a party outside it.
    #[error("SL_ERR_102: Party {party} is not a member of group {group}")]
    NotAGroupMember { party: PartyId, group: GroupId },

    /// A bilateral transaction named the same party on both sides.
    #[error("SL_ERR_103: Bilateral transaction with self: {0}")]
    SelfTransaction(PartyId),

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// Applying the amount would leave a balance outside the `i64` range.
    #[error("SL_ERR_200: Amount overflow: {amount} on balance of {party}")]
    AmountOverflow { party: PartyId, amount: i64 },

    // =================================================================
    // Transaction Log Errors (3xx)
    // =================================================================
    /// The supplied predecessor does not exist or already has a successor.
    #[error("SL_ERR_300: Invalid predecessor record: {reason}")]
    InvalidPredecessor { reason: String },

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// A pooled ledger total no longer matches the recorded net flow.
    #[error("SL_ERR_400: Conservation violation: {reason}")]
    ConservationViolation { reason: String },

    /// A settlement plan was applied to a group it was not computed for.
    #[error("SL_ERR_401: Plan for {found:?} applied to group {expected}")]
    PlanGroupMismatch {
        expected: GroupId,
        found: Option<GroupId>,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid document, missing fields, etc.).
    #[error("SL_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("SL_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SplitledgerError>;

impl From<serde_json::Error> for SplitledgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
