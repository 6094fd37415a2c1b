//! Transaction types and the append-only transaction log
//!
//! Every balance-changing event appends one transaction. Transactions are
//! created `Pending`, flip to `Confirmed` exactly once via the confirmation
//! sweep, and are never removed or reordered.

use crate::{Amount, SettlementId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Credit to the account (mint, bonus, check-in)
    Earn,
    /// Debit from the account (reward redemption, outbound transfer)
    Redeem,
}

/// Lifecycle status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Committed to the ledger, awaiting the confirmation sweep
    Pending,
    /// Swept; terminal state
    Confirmed,
}

/// A single balance-changing event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TxKind,
    /// Signed token delta: positive for Earn, negative Redeem magnitude
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: TxStatus,
    /// Present when the change was backed by an external settlement
    pub settlement_ref: Option<SettlementId>,
}

impl Transaction {
    /// Create a new Pending transaction. Transactions are never created in
    /// any other state.
    pub fn pending(
        kind: TxKind,
        amount: Amount,
        description: impl Into<String>,
        settlement_ref: Option<SettlementId>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount: amount.signed(kind == TxKind::Redeem),
            description: description.into(),
            created_at: Utc::now(),
            status: TxStatus::Pending,
            settlement_ref,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TxStatus::Pending
    }
}

/// Ordered record of balance-changing events, newest first.
///
/// Newest-first is the canonical order and is used directly for display;
/// there is no separate sort step. Append is O(1) at the head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLog(VecDeque<Transaction>);

impl TransactionLog {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    /// Append a transaction at the head (newest-first).
    pub fn append(&mut self, tx: Transaction) {
        self.0.push_front(tx);
    }

    /// Flip every currently Pending transaction to Confirmed.
    ///
    /// Idempotent: a repeated call when nothing is Pending is a no-op.
    /// Returns the number of transactions confirmed. Full scan, acceptable
    /// because the log is bounded by one session's activity.
    pub fn confirm_all_pending(&mut self) -> usize {
        let mut confirmed = 0;
        for tx in self.0.iter_mut() {
            if tx.status == TxStatus::Pending {
                tx.status = TxStatus::Confirmed;
                confirmed += 1;
            }
        }
        confirmed
    }

    pub fn pending_count(&self) -> usize {
        self.0.iter().filter(|t| t.is_pending()).count()
    }

    pub fn has_pending(&self) -> bool {
        self.0.iter().any(|t| t.is_pending())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.0.iter()
    }

    /// The most recent `limit` transactions, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        self.0.iter().take(limit).cloned().collect()
    }

    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.0.iter().find(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earn(amount: u64) -> Transaction {
        Transaction::pending(TxKind::Earn, Amount::new(amount), "test", None)
    }

    #[test]
    fn transactions_are_born_pending() {
        let tx = earn(100);
        assert_eq!(tx.status, TxStatus::Pending);
        assert_eq!(tx.amount, 100);
    }

    #[test]
    fn redeem_amount_is_negative() {
        let tx = Transaction::pending(TxKind::Redeem, Amount::new(200), "10% Off", None);
        assert_eq!(tx.amount, -200);
    }

    #[test]
    fn append_is_newest_first() {
        let mut log = TransactionLog::new();
        log.append(earn(1));
        log.append(earn(2));
        let amounts: Vec<i64> = log.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2, 1]);
    }

    #[test]
    fn confirm_all_pending_is_idempotent() {
        let mut log = TransactionLog::new();
        log.append(earn(500));
        log.append(earn(300));
        assert_eq!(log.confirm_all_pending(), 2);
        assert_eq!(log.confirm_all_pending(), 0);
        assert!(!log.has_pending());
        assert_eq!(log.len(), 2);
    }
}
