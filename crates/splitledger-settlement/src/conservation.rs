//! Pooled-ledger conservation checks.
//!
//! Invariant enforced for every group:
//! ```text
//! Σ(pooled balances) == Σ(opening balances) + Σ(external flows)
//! ```
//!
//! In-group transactions only redistribute balance, so without external
//! flows the pooled total never moves. [`audit_group`] goes further and
//! replays the group's log to rebuild every member's balance.

use std::collections::HashMap;

use splitledger_ledger::{BalanceLedger, Group};
use splitledger_types::{GroupId, Result, SplitledgerError};

/// Tracks money that entered or left each group from outside and
/// validates pooled totals against it.
pub struct ConservationCheck {
    /// Net external flow per group (inflow positive).
    external: HashMap<GroupId, i128>,
}

impl ConservationCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            external: HashMap::new(),
        }
    }

    /// Record money entering (`amount > 0`) or leaving a group.
    pub fn record_external(&mut self, group: GroupId, amount: i128) {
        *self.external.entry(group).or_insert(0) += amount;
    }

    /// Net external flow recorded for `group`.
    #[must_use]
    pub fn external_flow(&self, group: GroupId) -> i128 {
        self.external.get(&group).copied().unwrap_or(0)
    }

    /// What `group`'s pooled ledger should sum to.
    #[must_use]
    pub fn expected_total(&self, group: &Group) -> i128 {
        group.opening_total() + self.external_flow(group.id())
    }

    /// Verify the pooled total of `group`.
    ///
    /// # Errors
    /// Returns [`SplitledgerError::ConservationViolation`] if actual ≠ expected.
    pub fn verify(&self, group: &Group) -> Result<()> {
        let expected = self.expected_total(group);
        let actual = group.ledger().total();
        if actual != expected {
            return Err(SplitledgerError::ConservationViolation {
                reason: format!(
                    "Group {}: pooled total {actual} != expected {expected} \
                     (opening={}, external={})",
                    group.id(),
                    group.opening_total(),
                    self.external_flow(group.id()),
                ),
            });
        }
        Ok(())
    }
}

impl Default for ConservationCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `group`'s pooled ledger from its log and compare member by
/// member with the live one.
///
/// # Errors
/// Returns [`SplitledgerError::ConservationViolation`] naming the first
/// member whose balance differs.
pub fn audit_group(group: &Group) -> Result<()> {
    let mut replayed =
        BalanceLedger::initialize(group.members().iter().copied(), group.opening_balance());
    for record in group.log().iter() {
        if record.payer != record.payee {
            replayed.update(record.payer, record.amount);
            replayed.update(record.payee, record.amount.saturating_neg());
        }
    }

    for (party, live) in group.ledger().iter() {
        let expected = replayed.get(party).unwrap_or(0);
        if live != expected {
            tracing::warn!(
                group = %group.id(),
                party = %party,
                live,
                expected,
                "Pooled ledger disagrees with its log"
            );
            return Err(SplitledgerError::ConservationViolation {
                reason: format!(
                    "Group {}: {party} holds {live}, log replay gives {expected}",
                    group.id()
                ),
            });
        }
    }
    Ok(())
}
