//! Settlement plan types.

use serde::{Deserialize, Serialize};
use splitledger_ledger::BalanceLedger;
use splitledger_types::{Amount, CurrencyTag, GroupId, PartyId, TransactionId};

/// One proposed payment: `payer` pays `payee` `amount`.
///
/// Shaped like a transaction record but never part of any log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementProposal {
    pub id: TransactionId,
    pub payer: PartyId,
    pub payee: PartyId,
    /// Always strictly positive.
    pub amount: Amount,
    pub currency: CurrencyTag,
    pub group: Option<GroupId>,
}

/// Non-fatal conditions found while settling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementWarning {
    /// The ledger had no members at all.
    EmptyLedger,
    /// One side ran out while the other still held balance. The listed
    /// amounts were left unsettled.
    ResidualImbalance { residuals: Vec<(PartyId, Amount)> },
}

/// Ordered proposals plus any warnings raised while computing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub group: Option<GroupId>,
    pub currency: CurrencyTag,
    /// In emission order.
    pub proposals: Vec<SettlementProposal>,
    pub warnings: Vec<SettlementWarning>,
}

impl SettlementPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Balances left unsettled, if the ledger did not balance.
    #[must_use]
    pub fn residuals(&self) -> &[(PartyId, Amount)] {
        self.warnings
            .iter()
            .find_map(|w| match w {
                SettlementWarning::ResidualImbalance { residuals } => Some(residuals.as_slice()),
                SettlementWarning::EmptyLedger => None,
            })
            .unwrap_or(&[])
    }

    /// Total amount moved by the plan.
    #[must_use]
    pub fn total_amount(&self) -> i128 {
        self.proposals.iter().map(|p| i128::from(p.amount)).sum()
    }

    /// Apply every proposal to `ledger`, in order.
    ///
    /// A payer's balance rises by the amount and the payee's falls by it,
    /// the same convention as a recorded group transaction. Applied to a
    /// copy of the ledger the plan was computed from, every balance ends at
    /// zero unless the plan reports a residual.
    pub fn apply_to(&self, ledger: &mut BalanceLedger) {
        for proposal in &self.proposals {
            ledger.update(proposal.payer, proposal.amount);
            ledger.update(proposal.payee, -proposal.amount);
        }
    }
}
