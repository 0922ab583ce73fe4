//! Currency tags and amounts.
//!
//! Amounts are signed integers in the smallest unit the caller cares
//! about. A currency tag is an opaque label (a symbol like `"₹"` or a code
//! like `"EUR"`); the ledger never converts between tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Signed monetary amount.
pub type Amount = i64;

/// Opaque currency label attached to parties, groups and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CurrencyTag(String);

impl CurrencyTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most frequent tag in `tags`.
    ///
    /// Ties go to the tag seen first. Returns `None` for an empty input.
    pub fn most_frequent<'a, I>(tags: I) -> Option<CurrencyTag>
    where
        I: IntoIterator<Item = &'a CurrencyTag>,
    {
        // (tag, count) in first-seen order
        let mut counts: Vec<(&CurrencyTag, usize)> = Vec::new();
        for tag in tags {
            match counts.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, n)) => *n += 1,
                None => counts.push((tag, 1)),
            }
        }

        let mut best: Option<(&CurrencyTag, usize)> = None;
        for (tag, n) in counts {
            if best.is_none_or(|(_, m)| n > m) {
                best = Some((tag, n));
            }
        }
        best.map(|(tag, _)| tag.clone())
    }
}

impl Default for CurrencyTag {
    fn default() -> Self {
        Self::new(constants::DEFAULT_CURRENCY)
    }
}

impl From<&str> for CurrencyTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for CurrencyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
