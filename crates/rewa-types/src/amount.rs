//! Token amount type
//!
//! REWA points are a whole-unit fungible balance; no fractional precision.
//! All arithmetic is overflow-checked so the account invariants can never be
//! silently violated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative count of REWA tokens.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Signed view of this amount, negated for debit-side transactions.
    pub fn signed(self, debit: bool) -> i64 {
        let v = self.0 as i64;
        if debit { -v } else { v }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} REWA", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sub_refuses_to_go_negative() {
        assert_eq!(Amount::new(100).checked_sub(Amount::new(150)), None);
        assert_eq!(
            Amount::new(150).checked_sub(Amount::new(100)),
            Some(Amount::new(50))
        );
    }

    #[test]
    fn signed_view() {
        assert_eq!(Amount::new(200).signed(false), 200);
        assert_eq!(Amount::new(200).signed(true), -200);
    }
}
