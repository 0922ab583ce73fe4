//! Parties: people who owe or are owed money.

use splitledger_types::{Amount, CurrencyTag, GroupId, PartyId};

use crate::{BalanceLedger, RecordIndex, TransactionLog, Transfer};

/// A party with its own bilateral ledger and private transaction log.
///
/// Parties are owned by the [`crate::Registry`]; groups refer to them by
/// [`PartyId`] only.
#[derive(Debug, Clone)]
pub struct Party {
    id: PartyId,
    name: String,
    preferred_currency: CurrencyTag,
    /// Where the party wants to be paid (e.g. a UPI id).
    payment_handle: Option<String>,
    /// Direct counterparties outside any group.
    ledger: BalanceLedger,
    log: TransactionLog,
    /// Groups this party belongs to, in join order.
    groups: Vec<GroupId>,
}

impl Party {
    /// Create a party with a fresh id. Never fails.
    #[must_use]
    pub fn new(name: impl Into<String>, preferred_currency: CurrencyTag) -> Self {
        Self {
            id: PartyId::new(),
            name: name.into(),
            preferred_currency,
            payment_handle: None,
            ledger: BalanceLedger::new(),
            log: TransactionLog::new(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_payment_handle(mut self, handle: impl Into<String>) -> Self {
        self.payment_handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> PartyId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn preferred_currency(&self) -> &CurrencyTag {
        &self.preferred_currency
    }

    #[must_use]
    pub fn payment_handle(&self) -> Option<&str> {
        self.payment_handle.as_deref()
    }

    /// Bilateral ledger: this party's view of each direct counterparty.
    #[must_use]
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Private history of bilateral transactions.
    #[must_use]
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    #[must_use]
    pub fn is_in_group(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }

    pub(crate) fn set_payment_handle(&mut self, handle: Option<String>) {
        self.payment_handle = handle;
    }

    /// Record that this party paid `amount` to `counterparty`, in
    /// `currency`. Negative amounts are the mirrored side of a payment
    /// received.
    pub(crate) fn record_payment(
        &mut self,
        counterparty: PartyId,
        amount: Amount,
        currency: CurrencyTag,
    ) -> RecordIndex {
        self.ledger.update(counterparty, amount);
        self.log.push(Transfer {
            payer: self.id,
            payee: counterparty,
            amount,
            currency,
            group: None,
        })
    }

    /// Returns `false` if the party was already in `group`.
    pub(crate) fn join(&mut self, group: GroupId) -> bool {
        if self.is_in_group(group) {
            return false;
        }
        self.groups.push(group);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_party_is_empty() {
        let party = Party::new("Vishal", CurrencyTag::default());
        assert_eq!(party.name(), "Vishal");
        assert!(party.ledger().is_empty());
        assert!(party.log().is_empty());
        assert!(party.groups().is_empty());
        assert_eq!(party.payment_handle(), None);
    }

    #[test]
    fn parties_get_distinct_ids() {
        let a = Party::new("A", CurrencyTag::default());
        let b = Party::new("A", CurrencyTag::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn payment_handle_builder() {
        let party = Party::new("Jahnavi", CurrencyTag::from("₹")).with_payment_handle("j@upi");
        assert_eq!(party.payment_handle(), Some("j@upi"));
    }

    #[test]
    fn record_payment_updates_ledger_and_log() {
        let mut party = Party::new("A", CurrencyTag::default());
        let other = PartyId::new();
        let idx = party.record_payment(other, 250, CurrencyTag::default());
        assert_eq!(party.ledger().get(other), Some(250));
        let record = party.log().get(idx).unwrap();
        assert_eq!(record.payer, party.id());
        assert_eq!(record.payee, other);
        assert_eq!(record.group, None);
    }

    #[test]
    fn join_is_idempotent() {
        let mut party = Party::new("A", CurrencyTag::default());
        let group = GroupId::new();
        assert!(party.join(group));
        assert!(!party.join(group));
        assert_eq!(party.groups(), &[group]);
    }
}
