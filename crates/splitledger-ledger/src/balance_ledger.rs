//! Signed balance ledger keyed by counterparty.
//!
//! Entries keep the order in which counterparties were first inserted.
//! That order is the settlement tie-break, so it must never be disturbed
//! by updates.

use std::collections::HashMap;

use splitledger_types::{Amount, BalanceSnapshot, NetPosition, PartyId};

/// Ordered mapping from counterparty to signed balance.
///
/// A positive value for `X` means the owner gets back money from `X`; a
/// negative value means the owner owes `X`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    /// Entries in insertion order.
    entries: Vec<(PartyId, Amount)>,
    /// Position of each party in `entries`.
    index: HashMap<PartyId, usize>,
}

/// Ledger entries split by sign, each side in ledger order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Negative balances (these parties owe).
    pub owes: Vec<(PartyId, Amount)>,
    /// Positive balances (these parties get money back).
    pub gets: Vec<(PartyId, Amount)>,
    /// Exactly zero.
    pub settled: Vec<(PartyId, Amount)>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger where every supplied party starts at `default_value`.
    ///
    /// A party listed twice keeps its first position.
    #[must_use]
    pub fn initialize<I>(members: I, default_value: Amount) -> Self
    where
        I: IntoIterator<Item = PartyId>,
    {
        let mut ledger = Self::new();
        for party in members {
            ledger.insert_member(party, default_value);
        }
        ledger
    }

    /// Add `party` with `value` unless it is already present.
    ///
    /// Returns `true` if the party was inserted.
    pub fn insert_member(&mut self, party: PartyId, value: Amount) -> bool {
        if self.index.contains_key(&party) {
            return false;
        }
        self.index.insert(party, self.entries.len());
        self.entries.push((party, value));
        true
    }

    /// Add `delta` to the balance of `counterparty`, inserting it if absent.
    ///
    /// Saturates at the `i64` bounds. Callers that must not lose value
    /// check with [`BalanceLedger::checked_update`] first.
    pub fn update(&mut self, counterparty: PartyId, delta: Amount) {
        match self.index.get(&counterparty) {
            Some(&pos) => {
                let value = &mut self.entries[pos].1;
                *value = value.saturating_add(delta);
            }
            None => {
                self.index.insert(counterparty, self.entries.len());
                self.entries.push((counterparty, delta));
            }
        }
    }

    /// The balance `counterparty` would have after `update`, or `None` if
    /// it would overflow.
    #[must_use]
    pub fn checked_update(&self, counterparty: PartyId, delta: Amount) -> Option<Amount> {
        self.get(counterparty).unwrap_or(0).checked_add(delta)
    }

    /// Current balance for `party`, if it has an entry.
    #[must_use]
    pub fn get(&self, party: PartyId) -> Option<Amount> {
        self.index.get(&party).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn contains(&self, party: PartyId) -> bool {
        self.index.contains_key(&party)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PartyId, Amount)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Widened so it cannot overflow.
    #[must_use]
    pub fn total(&self) -> i128 {
        self.entries.iter().map(|(_, v)| i128::from(*v)).sum()
    }

    /// Whether the owner gets back, owes, or is even overall.
    #[must_use]
    pub fn net_position(&self) -> NetPosition {
        NetPosition::from_total(self.total())
    }

    /// Split entries by sign: owes (negative), gets (positive), settled (zero).
    #[must_use]
    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for &(party, value) in &self.entries {
            match value {
                v if v < 0 => partition.owes.push((party, v)),
                v if v > 0 => partition.gets.push((party, v)),
                v => partition.settled.push((party, v)),
            }
        }
        partition
    }

    /// Copy of the current entries.
    #[must_use]
    pub fn snapshot(&self) -> BalanceSnapshot {
        BalanceSnapshot {
            entries: self.entries.clone(),
        }
    }
}
