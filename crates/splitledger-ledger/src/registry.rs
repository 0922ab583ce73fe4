//! Registry of parties and groups.
//!
//! The registry owns every [`Party`] and [`Group`] and is the only place
//! where both sides of a bilateral transaction can be updated together.
//! Every mutating operation validates first and mutates second, so a
//! rejected call leaves all state unchanged.

use std::collections::HashMap;

use splitledger_types::{
    Amount, BalanceSnapshot, CurrencyTag, GroupId, LedgerConfig, PartyId, Result,
    SplitledgerError,
};

use crate::{Group, Party, RecordIndex};

/// Where a bilateral transaction landed in each party's private log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BilateralReceipt {
    pub payer_record: RecordIndex,
    pub payee_record: RecordIndex,
}

/// Owner of all parties and groups.
#[derive(Debug, Default)]
pub struct Registry {
    config: LedgerConfig,
    parties: HashMap<PartyId, Party>,
    groups: HashMap<GroupId, Group>,
}

impl Registry {
    /// Create an empty registry with `config`.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            parties: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Parties
    // -----------------------------------------------------------------

    /// Register a new party. Never fails.
    pub fn create_party(
        &mut self,
        name: impl Into<String>,
        preferred_currency: CurrencyTag,
    ) -> PartyId {
        self.insert_party(Party::new(name, preferred_currency))
    }

    /// Register a new party using the configured default currency.
    pub fn create_party_default(&mut self, name: impl Into<String>) -> PartyId {
        let currency = self.config.default_currency.clone();
        self.create_party(name, currency)
    }

    /// Register an already-built party (e.g. one with a payment handle).
    pub fn insert_party(&mut self, party: Party) -> PartyId {
        let id = party.id();
        tracing::debug!(party = %id, name = party.name(), "Party created");
        self.parties.insert(id, party);
        id
    }

    pub fn party(&self, id: PartyId) -> Result<&Party> {
        self.parties.get(&id).ok_or(SplitledgerError::PartyNotFound(id))
    }

    pub fn set_payment_handle(&mut self, id: PartyId, handle: Option<String>) -> Result<()> {
        self.parties
            .get_mut(&id)
            .ok_or(SplitledgerError::PartyNotFound(id))?
            .set_payment_handle(handle);
        Ok(())
    }

    pub fn parties(&self) -> impl Iterator<Item = &Party> {
        self.parties.values()
    }

    // -----------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------

    /// Create a group with an initial member list.
    ///
    /// The group currency is the most frequent preferred currency among the
    /// members (first seen wins ties), or the configured default for an
    /// empty group.
    ///
    /// # Errors
    /// `PartyNotFound` if any member is unknown; no group is created.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        members: &[PartyId],
    ) -> Result<GroupId> {
        let mut unique: Vec<PartyId> = Vec::with_capacity(members.len());
        let mut currencies = Vec::with_capacity(members.len());
        for &member in members {
            let party = self.party(member)?;
            if !unique.contains(&member) {
                unique.push(member);
                currencies.push(party.preferred_currency());
            }
        }
        let currency = CurrencyTag::most_frequent(currencies)
            .unwrap_or_else(|| self.config.default_currency.clone());

        let group = Group::new(name, &unique, currency, self.config.opening_balance);
        let id = group.id();
        for &member in group.members() {
            if let Some(party) = self.parties.get_mut(&member) {
                party.join(id);
            }
        }
        tracing::info!(
            group = %id,
            name = group.name(),
            members = group.members().len(),
            currency = %group.currency(),
            "Group created"
        );
        self.groups.insert(id, group);
        Ok(id)
    }

    pub fn group(&self, id: GroupId) -> Result<&Group> {
        self.groups.get(&id).ok_or(SplitledgerError::GroupNotFound(id))
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut Group> {
        self.groups.get_mut(&id).ok_or(SplitledgerError::GroupNotFound(id))
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Add one party to a group. Returns `false` if it was already a member.
    pub fn add_member(&mut self, group: GroupId, party: PartyId) -> Result<bool> {
        self.add_members(group, &[party]).map(|added| added == 1)
    }

    /// Add several parties to a group, in order. Returns how many were new.
    ///
    /// # Errors
    /// `GroupNotFound` or `PartyNotFound`; nobody is added in that case.
    pub fn add_members(&mut self, group: GroupId, parties: &[PartyId]) -> Result<usize> {
        self.group(group)?;
        for &party in parties {
            self.party(party)?;
        }

        let target = self.group_mut(group)?;
        let added: Vec<PartyId> = parties
            .iter()
            .copied()
            .filter(|&party| target.add_member(party))
            .collect();
        for party in &added {
            if let Some(p) = self.parties.get_mut(party) {
                p.join(group);
            }
        }
        tracing::debug!(group = %group, added = added.len(), "Members added");
        Ok(added.len())
    }

    // -----------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------

    /// Record that `payer` paid `payee` `amount` outside any group.
    ///
    /// Applies double entry: `payer.ledger[payee] += amount` and
    /// `payee.ledger[payer] -= amount`, with one record in each private
    /// log. Both records carry the payer's preferred currency.
    ///
    /// # Errors
    /// `PartyNotFound`, `SelfTransaction`, or `AmountOverflow`; nothing is
    /// recorded in that case.
    pub fn record_bilateral(
        &mut self,
        payer: PartyId,
        payee: PartyId,
        amount: Amount,
    ) -> Result<BilateralReceipt> {
        let payer_party = self.party(payer)?;
        let payee_party = self.party(payee)?;
        if payer == payee {
            return Err(SplitledgerError::SelfTransaction(payer));
        }

        let mirrored = amount
            .checked_neg()
            .ok_or(SplitledgerError::AmountOverflow { party: payee, amount })?;
        payer_party
            .ledger()
            .checked_update(payee, amount)
            .ok_or(SplitledgerError::AmountOverflow { party: payer, amount })?;
        payee_party
            .ledger()
            .checked_update(payer, mirrored)
            .ok_or(SplitledgerError::AmountOverflow { party: payee, amount })?;
        let currency = payer_party.preferred_currency().clone();

        let payer_record = self
            .parties
            .get_mut(&payer)
            .ok_or(SplitledgerError::PartyNotFound(payer))?
            .record_payment(payee, amount, currency.clone());
        let payee_record = self
            .parties
            .get_mut(&payee)
            .ok_or(SplitledgerError::PartyNotFound(payee))?
            .record_payment(payer, mirrored, currency);

        tracing::debug!(
            payer = %payer,
            payee = %payee,
            amount,
            "Bilateral transaction recorded"
        );
        Ok(BilateralReceipt {
            payer_record,
            payee_record,
        })
    }

    /// Record that `payer` paid `payee` `amount` inside `group`.
    ///
    /// # Errors
    /// `GroupNotFound`, `NotAGroupMember`, or `AmountOverflow`; the pooled
    /// ledger and log are unchanged in that case.
    pub fn record_in_group(
        &mut self,
        group: GroupId,
        payer: PartyId,
        payee: PartyId,
        amount: Amount,
    ) -> Result<RecordIndex> {
        self.group_mut(group)?.record(payer, payee, amount)
    }

    // -----------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------

    /// Current bilateral balances of a party.
    pub fn party_snapshot(&self, party: PartyId) -> Result<BalanceSnapshot> {
        Ok(self.party(party)?.ledger().snapshot())
    }

    /// Current pooled balances of a group.
    pub fn group_snapshot(&self, group: GroupId) -> Result<BalanceSnapshot> {
        Ok(self.group(group)?.ledger().snapshot())
    }
}
