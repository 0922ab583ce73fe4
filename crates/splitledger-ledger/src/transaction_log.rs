//! Append-only, doubly linked transaction history.
//!
//! Records live in an arena owned by the log; links are [`RecordIndex`]
//! handles rather than pointers. `prev` is a back-reference used for
//! lookup only. A record's `next` is written exactly once, when a
//! successor is appended after it, so the chain can never form a cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use splitledger_types::{
    Amount, CurrencyTag, GroupId, PartyId, Result, SplitledgerError, TransactionId,
};

/// Position of a record inside its owning [`TransactionLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordIndex(usize);

impl RecordIndex {
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// A money movement to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Who gave the money.
    pub payer: PartyId,
    /// Who received it.
    pub payee: PartyId,
    /// May be zero or negative.
    pub amount: Amount,
    pub currency: CurrencyTag,
    /// Set when the movement happened inside a group.
    pub group: Option<GroupId>,
}

/// One immutable entry in a transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub payer: PartyId,
    pub payee: PartyId,
    pub amount: Amount,
    pub currency: CurrencyTag,
    pub group: Option<GroupId>,
    pub recorded_at: DateTime<Utc>,
    prev: Option<RecordIndex>,
    next: Option<RecordIndex>,
}

impl TransactionRecord {
    /// Chronologically previous record in the same log.
    #[must_use]
    pub fn prev(&self) -> Option<RecordIndex> {
        self.prev
    }

    /// Chronologically next record, once one has been appended.
    #[must_use]
    pub fn next(&self) -> Option<RecordIndex> {
        self.next
    }
}

/// Arena of transaction records with head/tail handles.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
    head: Option<RecordIndex>,
    tail: Option<RecordIndex>,
}

impl TransactionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record for `transfer`, linking it after `predecessor`.
    ///
    /// The log's head is the first record ever appended. Its tail moves to
    /// the new record when the record extends the main chain (the log was
    /// empty or `predecessor` is the current tail). Appending with no
    /// predecessor to a non-empty log starts a detached chain that is only
    /// reachable through the returned index.
    ///
    /// # Errors
    /// Returns [`SplitledgerError::InvalidPredecessor`] if `predecessor` is
    /// not in this log or already has a successor.
    pub fn append(
        &mut self,
        transfer: Transfer,
        predecessor: Option<RecordIndex>,
    ) -> Result<RecordIndex> {
        if let Some(pred) = predecessor {
            let record = self
                .records
                .get(pred.0)
                .ok_or_else(|| SplitledgerError::InvalidPredecessor {
                    reason: format!("record {} does not exist", pred.0),
                })?;
            if record.next.is_some() {
                return Err(SplitledgerError::InvalidPredecessor {
                    reason: format!("record {} already has a successor", pred.0),
                });
            }
        }
        Ok(self.link(transfer, predecessor))
    }

    /// Append `transfer` after the current tail.
    pub fn push(&mut self, transfer: Transfer) -> RecordIndex {
        self.link(transfer, self.tail)
    }

    fn link(&mut self, transfer: Transfer, predecessor: Option<RecordIndex>) -> RecordIndex {
        let index = RecordIndex(self.records.len());
        self.records.push(TransactionRecord {
            id: TransactionId::new(),
            payer: transfer.payer,
            payee: transfer.payee,
            amount: transfer.amount,
            currency: transfer.currency,
            group: transfer.group,
            recorded_at: Utc::now(),
            prev: predecessor,
            next: None,
        });

        if let Some(pred) = predecessor {
            self.records[pred.0].next = Some(index);
        }
        if self.head.is_none() {
            self.head = Some(index);
        }
        if self.tail.is_none() || self.tail == predecessor {
            self.tail = Some(index);
        }
        index
    }

    /// Iterate records by following `next` links from `head`.
    ///
    /// An index outside this log yields an empty iterator.
    #[must_use]
    pub fn traverse_forward(&self, head: RecordIndex) -> Traverse<'_> {
        Traverse {
            log: self,
            cursor: Some(head),
            forward: true,
        }
    }

    /// Iterate records by following `prev` links from `tail`.
    #[must_use]
    pub fn traverse_backward(&self, tail: RecordIndex) -> Traverse<'_> {
        Traverse {
            log: self,
            cursor: Some(tail),
            forward: false,
        }
    }

    /// Main chain in chronological order.
    pub fn iter(&self) -> Traverse<'_> {
        Traverse {
            log: self,
            cursor: self.head,
            forward: true,
        }
    }

    #[must_use]
    pub fn get(&self, index: RecordIndex) -> Option<&TransactionRecord> {
        self.records.get(index.0)
    }

    /// Look up a record by its transaction id.
    #[must_use]
    pub fn find(&self, id: TransactionId) -> Option<(RecordIndex, &TransactionRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.id == id)
            .map(|(i, r)| (RecordIndex(i), r))
    }

    #[must_use]
    pub fn head(&self) -> Option<RecordIndex> {
        self.head
    }

    #[must_use]
    pub fn tail(&self) -> Option<RecordIndex> {
        self.tail
    }

    /// Number of records, including detached chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lazy walk along a log's links.
pub struct Traverse<'a> {
    log: &'a TransactionLog,
    cursor: Option<RecordIndex>,
    forward: bool,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a TransactionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.log.get(self.cursor?)?;
        self.cursor = if self.forward { record.next } else { record.prev };
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(payer: PartyId, payee: PartyId, amount: Amount) -> Transfer {
        Transfer {
            payer,
            payee,
            amount,
            currency: CurrencyTag::default(),
            group: None,
        }
    }

    #[test]
    fn empty_log() {
        let log = TransactionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.head(), None);
        assert_eq!(log.tail(), None);
        assert_eq!(log.iter().count(), 0);
    }

    #[test]
    fn append_links_both_directions() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let first = log.append(transfer(a, b, 10), None).unwrap();
        let second = log.append(transfer(b, a, 20), Some(first)).unwrap();

        assert_eq!(log.get(first).unwrap().next(), Some(second));
        assert_eq!(log.get(second).unwrap().prev(), Some(first));
        assert_eq!(log.get(first).unwrap().prev(), None);
        assert_eq!(log.head(), Some(first));
        assert_eq!(log.tail(), Some(second));
    }

    #[test]
    fn push_extends_tail() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        for amount in [1, 2, 3] {
            log.push(transfer(a, b, amount));
        }
        let amounts: Vec<Amount> = log.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![1, 2, 3]);
    }

    #[test]
    fn traverse_forward_from_middle() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        log.push(transfer(a, b, 1));
        let middle = log.push(transfer(a, b, 2));
        log.push(transfer(a, b, 3));
        let amounts: Vec<Amount> = log.traverse_forward(middle).map(|r| r.amount).collect();
        assert_eq!(amounts, vec![2, 3]);
    }

    #[test]
    fn traverse_is_restartable() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let head = log.push(transfer(a, b, 1));
        log.push(transfer(a, b, 2));
        assert_eq!(log.traverse_forward(head).count(), 2);
        assert_eq!(log.traverse_forward(head).count(), 2);
    }

    #[test]
    fn traverse_backward_from_tail() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        log.push(transfer(a, b, 1));
        log.push(transfer(a, b, 2));
        let tail = log.push(transfer(a, b, 3));
        let amounts: Vec<Amount> = log.traverse_backward(tail).map(|r| r.amount).collect();
        assert_eq!(amounts, vec![3, 2, 1]);
    }

    #[test]
    fn predecessor_with_successor_rejected() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let first = log.push(transfer(a, b, 1));
        log.push(transfer(a, b, 2));

        let err = log.append(transfer(a, b, 3), Some(first)).unwrap_err();
        assert!(matches!(err, SplitledgerError::InvalidPredecessor { .. }));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn unknown_predecessor_rejected() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let err = log
            .append(transfer(a, b, 1), Some(RecordIndex(4)))
            .unwrap_err();
        assert!(matches!(err, SplitledgerError::InvalidPredecessor { .. }));
        assert!(log.is_empty());
    }

    #[test]
    fn detached_chain_leaves_main_chain_alone() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let head = log.push(transfer(a, b, 1));
        let detached = log.append(transfer(a, b, 99), None).unwrap();

        assert_eq!(log.head(), Some(head));
        assert_eq!(log.tail(), Some(head));
        assert_eq!(log.iter().count(), 1);
        assert_eq!(log.traverse_forward(detached).count(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn find_by_id() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        log.push(transfer(a, b, 1));
        let idx = log.push(transfer(a, b, 2));
        let id = log.get(idx).unwrap().id;
        let (found, record) = log.find(id).unwrap();
        assert_eq!(found, idx);
        assert_eq!(record.amount, 2);
        assert!(log.find(TransactionId::new()).is_none());
    }

    #[test]
    fn out_of_range_traversal_is_empty() {
        let log = TransactionLog::new();
        assert_eq!(log.traverse_forward(RecordIndex(3)).count(), 0);
    }

    #[test]
    fn zero_and_negative_amounts_recorded() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        log.push(transfer(a, b, 0));
        log.push(transfer(a, b, -40));
        let amounts: Vec<Amount> = log.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![0, -40]);
    }

    #[test]
    fn record_serde_roundtrip() {
        let (a, b) = (PartyId::new(), PartyId::new());
        let mut log = TransactionLog::new();
        let idx = log.push(transfer(a, b, 7));
        let record = log.get(idx).unwrap().clone();
        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
