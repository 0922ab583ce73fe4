//! # splitledger-ledger
//!
//! **Bookkeeping plane**: parties, groups, signed balance ledgers, and the
//! append-only transaction history.
//!
//! ## Architecture
//!
//! 1. **BalanceLedger**: ordered `PartyId → i64` map under the
//!    "positive = gets back, negative = owes" convention
//! 2. **TransactionLog**: arena-backed doubly linked chain of records
//! 3. **Party**: identity plus a bilateral ledger and a private log
//! 4. **Group**: member list plus a pooled ledger and a shared log
//! 5. **Registry**: owns every party and group, enforces double entry
//!
//! ## Recording Flow
//!
//! ```text
//! Registry.record_bilateral(A, B, v) → A.ledger[B] += v, B.ledger[A] -= v
//!                                    → one record in each private log
//! Registry.record_in_group(G, A, B, v) → membership check
//!                                      → G.ledger[A] += v, G.ledger[B] -= v
//!                                      → one record in G's log
//! ```
//!
//! All mutation is single-writer through `&mut`; a multi-threaded host
//! wraps the [`Registry`] in its own lock.

pub mod balance_ledger;
pub mod group;
pub mod party;
pub mod registry;
pub mod transaction_log;

pub use balance_ledger::{BalanceLedger, Partition};
pub use group::Group;
pub use party::Party;
pub use registry::{BilateralReceipt, Registry};
pub use transaction_log::{RecordIndex, TransactionLog, TransactionRecord, Transfer};
