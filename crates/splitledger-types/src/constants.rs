//! System-wide constants for SplitLedger.

/// Currency tag used when no preference is configured.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Opening balance given to every member when a ledger is initialised.
pub const DEFAULT_OPENING_BALANCE: i64 = 0;

/// Display prefix for party identifiers.
pub const PARTY_ID_PREFIX: &str = "mb-";

/// Display prefix for group identifiers.
pub const GROUP_ID_PREFIX: &str = "gr-";

/// Display prefix for transaction identifiers.
pub const TRANSACTION_ID_PREFIX: &str = "tr-";

/// Domain separator for deterministic settlement proposal ids.
pub const PROPOSAL_ID_DOMAIN: &[u8] = b"splitledger:proposal_id:v1:";

/// Domain separator for settlement plan digests.
pub const PLAN_ROOT_DOMAIN: &[u8] = b"splitledger:plan_root:v1:";
