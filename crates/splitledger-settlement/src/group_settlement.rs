//! Settlement against groups held in a [`Registry`].

use splitledger_ledger::{RecordIndex, Registry};
use splitledger_types::{GroupId, Result, SplitledgerError};

use crate::determinism::{compute_plan_root, plan_root_hex};
use crate::engine::SettlementEngine;
use crate::plan::SettlementPlan;

/// Compute the settlement plan for `group`'s pooled ledger.
///
/// Advisory only: the registry is not touched.
pub fn settle_group(registry: &Registry, group: GroupId) -> Result<SettlementPlan> {
    let target = registry.group(group)?;
    Ok(SettlementEngine::for_group(target).calculate(target.ledger()))
}

/// Record every proposal of `plan` as a real transaction in `group`.
///
/// All proposals are validated before the first one is recorded, so either
/// the whole plan lands in the group's log or nothing does.
///
/// # Errors
/// - `GroupNotFound` for an unknown group
/// - `PlanGroupMismatch` if `plan` was computed for another group (or for a
///   standalone ledger)
/// - `NotAGroupMember` if a proposal names a non-member
/// - `AmountOverflow` if applying the plan would overflow a balance
pub fn apply_plan(
    registry: &mut Registry,
    group: GroupId,
    plan: &SettlementPlan,
) -> Result<Vec<RecordIndex>> {
    let target = registry.group(group)?;
    if plan.group != Some(group) {
        return Err(SplitledgerError::PlanGroupMismatch {
            expected: group,
            found: plan.group,
        });
    }
    let mut simulated = target.ledger().clone();
    for proposal in &plan.proposals {
        for party in [proposal.payer, proposal.payee] {
            if !target.is_member(party) {
                return Err(SplitledgerError::NotAGroupMember { party, group });
            }
        }
        if proposal.payer == proposal.payee {
            continue;
        }
        let debit = proposal
            .amount
            .checked_neg()
            .ok_or(SplitledgerError::AmountOverflow {
                party: proposal.payee,
                amount: proposal.amount,
            })?;
        for (party, delta) in [(proposal.payer, proposal.amount), (proposal.payee, debit)] {
            simulated
                .checked_update(party, delta)
                .ok_or(SplitledgerError::AmountOverflow {
                    party,
                    amount: proposal.amount,
                })?;
            simulated.update(party, delta);
        }
    }

    let mut records = Vec::with_capacity(plan.proposals.len());
    for proposal in &plan.proposals {
        records.push(registry.record_in_group(
            group,
            proposal.payer,
            proposal.payee,
            proposal.amount,
        )?);
    }

    tracing::info!(
        group = %group,
        proposals = plan.proposals.len(),
        plan_root = %plan_root_hex(&compute_plan_root(&plan.proposals)),
        "Settlement plan applied"
    );
    Ok(records)
}
