//! Account state
//!
//! One `AccountState` exists per session and is exclusively owned by the
//! Ledger. Every field carries a serde default so that a snapshot written by
//! an older build shallow-merges over a fresh default on load.

use crate::{Amount, TransactionLog};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The authoritative account state for one loyalty-token holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Current spendable token count
    #[serde(default)]
    pub balance: Amount,
    /// Lifetime credits; monotonically non-decreasing
    #[serde(default)]
    pub total_earned: Amount,
    /// Lifetime debits; monotonically non-decreasing
    #[serde(default)]
    pub total_redeemed: Amount,
    /// External settlement address
    #[serde(default = "generate_address")]
    pub address: String,
    /// Consecutive-day check-in counter
    #[serde(default)]
    pub streak: u32,
    /// Calendar date of the last daily check-in (date only)
    #[serde(default)]
    pub last_claim_date: Option<NaiveDate>,
    /// One lucky spin per session
    #[serde(default = "default_true")]
    pub spin_available: bool,
    /// Ids of one-time earn actions already claimed
    #[serde(default)]
    pub completed_actions: HashSet<String>,
    /// Append-only transaction log, newest first
    #[serde(default)]
    pub transactions: TransactionLog,
    /// When this account was first generated
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Generate a fresh testnet-style settlement address (`tb1p` + 58 base36 chars).
pub fn generate_address() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..58)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("tb1p{suffix}")
}

impl AccountState {
    /// A freshly generated default account: random address, zeroed counters.
    pub fn generate() -> Self {
        Self {
            balance: Amount::zero(),
            total_earned: Amount::zero(),
            total_redeemed: Amount::zero(),
            address: generate_address(),
            streak: 0,
            last_claim_date: None,
            spin_available: true,
            completed_actions: HashSet::new(),
            transactions: TransactionLog::new(),
            created_at: Utc::now(),
        }
    }

    /// Check the core accounting invariant:
    /// `balance == total_earned - total_redeemed` and nothing negative.
    pub fn invariant_holds(&self) -> bool {
        self.total_earned
            .checked_sub(self.total_redeemed)
            .map(|net| net == self.balance)
            .unwrap_or(false)
    }
}

impl Default for AccountState {
    fn default() -> Self {
        Self::generate()
    }
}
