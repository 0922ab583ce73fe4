//! Determinism verification for settlement plans.
//!
//! Settling the same ledger must always produce the same plan. The plan
//! root is a SHA-256 digest over the proposals that lets two callers
//! compare plans without exchanging full payloads.

use sha2::{Digest, Sha256};
use splitledger_types::constants;

use crate::plan::SettlementProposal;

/// Compute the plan root over a sequence of proposals.
///
/// Depends on proposal ids, parties, amounts and currency, in order.
#[must_use]
pub fn compute_plan_root(proposals: &[SettlementProposal]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::PLAN_ROOT_DOMAIN);
    hasher.update((proposals.len() as u64).to_le_bytes());

    for proposal in proposals {
        hasher.update(proposal.id.0.as_bytes());
        hasher.update(proposal.payer.0.as_bytes());
        hasher.update(proposal.payee.0.as_bytes());
        hasher.update(proposal.amount.to_le_bytes());
        hasher.update(proposal.currency.as_str().as_bytes());
        hasher.update([0u8]);
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root and compare with `expected_root`.
#[must_use]
pub fn verify_plan_root(proposals: &[SettlementProposal], expected_root: &[u8; 32]) -> bool {
    compute_plan_root(proposals) == *expected_root
}

/// Hex form of a plan root, for logs.
#[must_use]
pub fn plan_root_hex(root: &[u8; 32]) -> String {
    hex::encode(root)
}
