//! Greedy min-cash-flow settlement.
//!
//! Algorithm:
//! 1. Split the ledger into debtors (negative) and creditors (positive)
//! 2. Pick the max debtor (most negative) and max creditor (most positive)
//! 3. Debtor pays creditor `min(creditor, -debtor)`; both move toward zero
//! 4. Repeat until either side has no non-zero balance left
//!
//! Ties on the extreme value go to the party inserted first into the
//! ledger, so the same ledger always produces the same plan.

use splitledger_ledger::{BalanceLedger, Group};
use splitledger_types::{Amount, CurrencyTag, GroupId, PartyId, TransactionId};

use crate::plan::{SettlementPlan, SettlementProposal, SettlementWarning};

/// Computes settlement plans, stamping proposals with a currency and an
/// optional group.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    currency: CurrencyTag,
    group: Option<GroupId>,
}

impl SettlementEngine {
    /// Engine for a ledger that does not belong to a group.
    #[must_use]
    pub fn new(currency: CurrencyTag) -> Self {
        Self {
            currency,
            group: None,
        }
    }

    /// Engine stamping proposals with `group`'s id and currency.
    #[must_use]
    pub fn for_group(group: &Group) -> Self {
        Self {
            currency: group.currency().clone(),
            group: Some(group.id()),
        }
    }

    /// Compute the settlement plan for `ledger`. Never mutates it.
    #[must_use]
    pub fn calculate(&self, ledger: &BalanceLedger) -> SettlementPlan {
        let mut plan = SettlementPlan {
            group: self.group,
            currency: self.currency.clone(),
            proposals: Vec::new(),
            warnings: Vec::new(),
        };

        if ledger.is_empty() {
            tracing::warn!(
                group = ?self.group,
                "Settlement requested on a ledger with no members"
            );
            plan.warnings.push(SettlementWarning::EmptyLedger);
            return plan;
        }

        let partition = ledger.partition();
        let mut owes = partition.owes;
        let mut gets = partition.gets;

        let mut sequence: u64 = 0;
        while let (Some(d), Some(c)) = (max_debtor(&owes), max_creditor(&gets)) {
            let (debtor, debt) = owes[d];
            let (creditor, credit) = gets[c];

            // |i64::MIN| does not fit in i64, but the credit always does.
            let amount = i64::try_from(debt.unsigned_abs()).map_or(credit, |owed| owed.min(credit));

            owes[d].1 += amount;
            gets[c].1 -= amount;

            let proposal = SettlementProposal {
                id: TransactionId::deterministic(self.group, sequence),
                payer: debtor,
                payee: creditor,
                amount,
                currency: self.currency.clone(),
                group: self.group,
            };
            tracing::debug!(
                proposal = %proposal.id.short(),
                payer = %debtor,
                payee = %creditor,
                amount,
                "Settlement proposal emitted"
            );
            plan.proposals.push(proposal);
            sequence += 1;
        }

        let residuals: Vec<(PartyId, Amount)> = owes
            .into_iter()
            .chain(gets)
            .filter(|&(_, v)| v != 0)
            .collect();
        if !residuals.is_empty() {
            tracing::warn!(
                group = ?self.group,
                unsettled = residuals.len(),
                "Ledger does not balance; residual left unsettled"
            );
            plan.warnings.push(SettlementWarning::ResidualImbalance { residuals });
        }

        tracing::info!(
            group = ?self.group,
            members = ledger.len(),
            proposals = plan.proposals.len(),
            warnings = plan.warnings.len(),
            "Settlement plan complete"
        );
        plan
    }
}

/// Settle a standalone ledger in the default currency.
///
/// Proposal ids are scoped by group and emission sequence only, so they are
/// unique within one plan (and across groups) but two standalone plans reuse
/// the same ids. Compare standalone plans by plan root, not by id.
#[must_use]
pub fn calculate_settlements(ledger: &BalanceLedger) -> SettlementPlan {
    SettlementEngine::default().calculate(ledger)
}

/// Index of the most negative balance; first one wins ties.
fn max_debtor(owes: &[(PartyId, Amount)]) -> Option<usize> {
    let mut best: Option<(usize, Amount)> = None;
    for (i, &(_, v)) in owes.iter().enumerate() {
        if v < 0 && best.is_none_or(|(_, b)| v < b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the most positive balance; first one wins ties.
fn max_creditor(gets: &[(PartyId, Amount)]) -> Option<usize> {
    let mut best: Option<(usize, Amount)> = None;
    for (i, &(_, v)) in gets.iter().enumerate() {
        if v > 0 && best.is_none_or(|(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
