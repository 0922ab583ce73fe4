//! Per-member view of a settlement plan.
//!
//! Answers "who gets how much from whom" without any rendering: positive
//! figures are money a member receives, negative figures money it pays.

use serde::{Deserialize, Serialize};
use splitledger_types::{CurrencyTag, PartyId};

use crate::plan::SettlementPlan;

/// Everything one member pays or receives under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSettlement {
    pub party: PartyId,
    /// Positive: receives in total. Negative: pays in total.
    pub net: i128,
    /// Per counterparty, in first-appearance order.
    pub counterparties: Vec<(PartyId, i128)>,
}

impl MemberSettlement {
    fn add(&mut self, counterparty: PartyId, amount: i128) {
        self.net += amount;
        match self
            .counterparties
            .iter_mut()
            .find(|(p, _)| *p == counterparty)
        {
            Some((_, total)) => *total += amount,
            None => self.counterparties.push((counterparty, amount)),
        }
    }
}

/// Settlement plan regrouped by member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub currency: CurrencyTag,
    /// In order of first appearance in the plan (payer before payee).
    pub members: Vec<MemberSettlement>,
}

impl SettlementSummary {
    #[must_use]
    pub fn from_plan(plan: &SettlementPlan) -> Self {
        let mut members: Vec<MemberSettlement> = Vec::new();
        for proposal in &plan.proposals {
            let amount = i128::from(proposal.amount);
            for (party, counterparty, signed) in [
                (proposal.payer, proposal.payee, -amount),
                (proposal.payee, proposal.payer, amount),
            ] {
                let pos = match members.iter().position(|m| m.party == party) {
                    Some(pos) => pos,
                    None => {
                        members.push(MemberSettlement {
                            party,
                            net: 0,
                            counterparties: Vec::new(),
                        });
                        members.len() - 1
                    }
                };
                members[pos].add(counterparty, signed);
            }
        }
        Self {
            currency: plan.currency.clone(),
            members,
        }
    }

    #[must_use]
    pub fn member(&self, party: PartyId) -> Option<&MemberSettlement> {
        self.members.iter().find(|m| m.party == party)
    }

    /// Members who receive money overall.
    pub fn receivers(&self) -> impl Iterator<Item = &MemberSettlement> {
        self.members.iter().filter(|m| m.net > 0)
    }

    /// Members who pay money overall.
    pub fn payers(&self) -> impl Iterator<Item = &MemberSettlement> {
        self.members.iter().filter(|m| m.net < 0)
    }
}

impl From<&SettlementPlan> for SettlementSummary {
    fn from(plan: &SettlementPlan) -> Self {
        Self::from_plan(plan)
    }
}

#[cfg(test)]
mod tests {
    use splitledger_ledger::BalanceLedger;

    use super::*;
    use crate::calculate_settlements;

    #[test]
    fn empty_plan_empty_summary() {
        let plan = calculate_settlements(&BalanceLedger::new());
        let summary = SettlementSummary::from_plan(&plan);
        assert!(summary.members.is_empty());
    }

    #[test]
    fn reference_scenario_summary() {
        let (a, b, c) = (PartyId::new(), PartyId::new(), PartyId::new());
        let mut ledger = BalanceLedger::new();
        ledger.update(a, 500);
        ledger.update(b, -300);
        ledger.update(c, -200);
        let summary = SettlementSummary::from(&calculate_settlements(&ledger));

        let creditor = summary.member(a).unwrap();
        assert_eq!(creditor.net, 500);
        assert_eq!(creditor.counterparties, vec![(b, 300), (c, 200)]);

        assert_eq!(summary.member(b).unwrap().net, -300);
        assert_eq!(summary.member(c).unwrap().counterparties, vec![(a, -200)]);

        assert_eq!(summary.receivers().count(), 1);
        assert_eq!(summary.payers().count(), 2);
    }

    #[test]
    fn member_order_is_first_appearance() {
        let (a, b, c) = (PartyId::new(), PartyId::new(), PartyId::new());
        let mut ledger = BalanceLedger::new();
        ledger.update(a, 500);
        ledger.update(b, -300);
        ledger.update(c, -200);
        let summary = SettlementSummary::from_plan(&calculate_settlements(&ledger));
        let order: Vec<PartyId> = summary.members.iter().map(|m| m.party).collect();
        assert_eq!(order, vec![b, a, c]);
    }

    #[test]
    fn nets_sum_to_zero() {
        let p: Vec<PartyId> = (0..4).map(|_| PartyId::new()).collect();
        let mut ledger = BalanceLedger::new();
        for (party, v) in p.iter().zip([120, -20, -60, -40]) {
            ledger.update(*party, v);
        }
        let summary = SettlementSummary::from_plan(&calculate_settlements(&ledger));
        let total: i128 = summary.members.iter().map(|m| m.net).sum();
        assert_eq!(total, 0);
    }
}
