//! Balance summary types.
//!
//! Sign convention everywhere: a positive balance means the owner **gets
//! back** money from the counterparty, a negative one means the owner
//! **owes** it.

use serde::{Deserialize, Serialize};

use crate::{Amount, PartyId};

/// Net position of a ledger owner across all counterparties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetPosition {
    /// Owner is owed this much in total.
    GetsBack(i128),
    /// Owner owes this much in total (stored as a positive magnitude).
    Owes(i128),
    /// Everything nets to zero.
    Even,
}

impl NetPosition {
    /// Classify a signed total.
    #[must_use]
    pub fn from_total(total: i128) -> Self {
        match total {
            t if t > 0 => Self::GetsBack(t),
            t if t < 0 => Self::Owes(-t),
            _ => Self::Even,
        }
    }

    /// Signed total this position was built from.
    #[must_use]
    pub fn signed(&self) -> i128 {
        match *self {
            Self::GetsBack(n) => n,
            Self::Owes(n) => -n,
            Self::Even => 0,
        }
    }
}

/// Point-in-time copy of a ledger's entries, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub entries: Vec<(PartyId, Amount)>,
}

impl BalanceSnapshot {
    /// Balance recorded for `party`, if present.
    #[must_use]
    pub fn get(&self, party: PartyId) -> Option<Amount> {
        self.entries
            .iter()
            .find(|(p, _)| *p == party)
            .map(|(_, amount)| *amount)
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> i128 {
        self.entries.iter().map(|(_, a)| i128::from(*a)).sum()
    }
}
