//! Groups: parties sharing one pooled ledger and one shared log.
//!
//! When `A` pays `B` an amount `v` inside the group, the pooled ledger
//! gains `+v` for `A` and `-v` for `B`, so every recorded transaction
//! redistributes balance without creating any.

use splitledger_types::{Amount, CurrencyTag, GroupId, PartyId, Result, SplitledgerError};

use crate::{BalanceLedger, RecordIndex, TransactionLog, Transfer};

/// A named set of members with a pooled ledger.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    /// Non-owning member references, in join order, without duplicates.
    members: Vec<PartyId>,
    ledger: BalanceLedger,
    log: TransactionLog,
    currency: CurrencyTag,
    /// Balance every member starts with.
    opening_balance: Amount,
    /// Sum of opening balances handed out so far.
    opening_total: i128,
    /// Sum of every amount recorded in the group.
    gross_volume: i128,
}

impl Group {
    /// Create a group. Duplicate members are dropped.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        members: &[PartyId],
        currency: CurrencyTag,
        opening_balance: Amount,
    ) -> Self {
        let mut group = Self {
            id: GroupId::new(),
            name: name.into(),
            members: Vec::with_capacity(members.len()),
            ledger: BalanceLedger::new(),
            log: TransactionLog::new(),
            currency,
            opening_balance,
            opening_total: 0,
            gross_volume: 0,
        };
        for &party in members {
            group.add_member(party);
        }
        group
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn members(&self) -> &[PartyId] {
        &self.members
    }

    #[must_use]
    pub fn is_member(&self, party: PartyId) -> bool {
        self.members.contains(&party)
    }

    /// Pooled ledger.
    #[must_use]
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Shared history of in-group transactions.
    #[must_use]
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    #[must_use]
    pub fn currency(&self) -> &CurrencyTag {
        &self.currency
    }

    #[must_use]
    pub fn opening_balance(&self) -> Amount {
        self.opening_balance
    }

    /// What the pooled ledger should sum to when only internal movement
    /// has been recorded.
    #[must_use]
    pub fn opening_total(&self) -> i128 {
        self.opening_total
    }

    #[must_use]
    pub fn gross_volume(&self) -> i128 {
        self.gross_volume
    }

    /// Add `party` with the opening balance. Returns `false` if it was
    /// already a member.
    pub(crate) fn add_member(&mut self, party: PartyId) -> bool {
        if self.is_member(party) {
            return false;
        }
        self.members.push(party);
        if self.ledger.insert_member(party, self.opening_balance) {
            self.opening_total += i128::from(self.opening_balance);
        }
        true
    }

    /// Record that `payer` paid `payee` `amount` inside the group.
    ///
    /// Nothing changes unless the whole transaction can be applied.
    ///
    /// # Errors
    /// - `NotAGroupMember` naming the payer (checked first) or the payee
    /// - `AmountOverflow` if either balance would leave the `i64` range
    pub fn record(
        &mut self,
        payer: PartyId,
        payee: PartyId,
        amount: Amount,
    ) -> Result<RecordIndex> {
        for party in [payer, payee] {
            if !self.is_member(party) {
                tracing::warn!(
                    group = %self.id,
                    party = %party,
                    amount,
                    "Group transaction rejected: party is not a member"
                );
                return Err(SplitledgerError::NotAGroupMember {
                    party,
                    group: self.id,
                });
            }
        }

        if payer != payee {
            let credit = amount;
            let debit = amount
                .checked_neg()
                .ok_or(SplitledgerError::AmountOverflow { party: payee, amount })?;
            self.ledger
                .checked_update(payer, credit)
                .ok_or(SplitledgerError::AmountOverflow { party: payer, amount })?;
            self.ledger
                .checked_update(payee, debit)
                .ok_or(SplitledgerError::AmountOverflow { party: payee, amount })?;

            self.ledger.update(payer, credit);
            self.ledger.update(payee, debit);
        }
        self.gross_volume += i128::from(amount);

        let index = self.log.push(Transfer {
            payer,
            payee,
            amount,
            currency: self.currency.clone(),
            group: Some(self.id),
        });

        tracing::debug!(
            group = %self.id,
            payer = %payer,
            payee = %payee,
            amount,
            "Group transaction recorded"
        );
        Ok(index)
    }
}
