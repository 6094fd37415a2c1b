//! REWA Ledger - the authoritative account state
//!
//! The ledger is:
//! - Exclusively owned: the only writer of balance and counter fields
//! - Append-only: every balance change appends a Pending transaction
//! - Write-through: every committed mutation persists the full snapshot
//! - Precondition-checked: a returned error means nothing was mutated
//!
//! # Invariants
//!
//! 1. `balance == total_earned - total_redeemed` after every commit
//! 2. `balance` never goes negative
//! 3. `total_earned` / `total_redeemed` never decrease
//! 4. A transaction moves Pending -> Confirmed at most once, never back
//!
//! # Confirmation sweep
//!
//! A deferred sweep is re-armed on every log mutation: it fires a fixed
//! interval after the latest append and flips every transaction Pending at
//! that moment to Confirmed, including ones appended after it was scheduled.
//! A full-state reset bumps a generation counter; a sweep captured against
//! the prior state no-ops rather than resurrect stale data.

use chrono::NaiveDate;
use rewa_rewards::{next_streak, StreakUpdate};
use rewa_store::SnapshotStore;
use rewa_types::{
    AccountState, Amount, Result, RewaError, SettlementId, Transaction, TransactionId, TxKind,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Delay between the latest log mutation and the confirmation sweep.
pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_secs(2);

/// Outcome of a daily check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinOutcome {
    pub streak: u32,
    pub bonus: Amount,
    pub transaction: TransactionId,
}

/// The authoritative ledger. Cheap to clone; clones share the same account.
#[derive(Clone)]
pub struct Ledger {
    state: Arc<RwLock<AccountState>>,
    store: Arc<dyn SnapshotStore>,
    confirm_delay: Duration,
    /// Bumped on every log mutation; an armed sweep only fires if it is
    /// still the latest one.
    sweep_epoch: Arc<AtomicU64>,
    /// Bumped on full-state reset; invalidates sweeps captured before it.
    generation: Arc<AtomicU64>,
}

impl Ledger {
    /// Load the account from the store (or a fresh default) and wrap it.
    pub async fn open(store: Arc<dyn SnapshotStore>) -> Self {
        let state = store.load().await;
        info!(balance = state.balance.value(), transactions = state.transactions.len(), "ledger opened");
        Self {
            state: Arc::new(RwLock::new(state)),
            store,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
            sweep_epoch: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    /// Read-only snapshot of the current account state.
    pub async fn snapshot(&self) -> AccountState {
        self.state.read().await.clone()
    }

    pub async fn balance(&self) -> Amount {
        self.state.read().await.balance
    }

    /// Credit the account and append a Pending Earn transaction.
    ///
    /// Fails with `InvalidAmount` on a zero amount; no mutation occurs.
    pub async fn apply_earn(
        &self,
        amount: Amount,
        description: impl Into<String>,
        settlement_ref: Option<SettlementId>,
    ) -> Result<TransactionId> {
        let id = {
            let mut state = self.state.write().await;
            credit(&mut state, amount, description.into(), settlement_ref)?
        };
        self.committed().await;
        Ok(id)
    }

    /// Debit the account and append a Pending Redeem transaction.
    ///
    /// Fails with `InsufficientBalance` when `cost > balance`; no mutation,
    /// no transaction appended.
    pub async fn apply_redeem(
        &self,
        cost: Amount,
        description: impl Into<String>,
        settlement_ref: Option<SettlementId>,
    ) -> Result<TransactionId> {
        let id = {
            let mut state = self.state.write().await;
            debit(&mut state, cost, description.into(), settlement_ref)?
        };
        self.committed().await;
        Ok(id)
    }

    /// Transfer out of the local account. The counterparty is off-system, so
    /// no credit side is modeled: this is a Redeem-shaped debit.
    pub async fn apply_transfer(
        &self,
        amount: Amount,
        counterparty: &str,
        settlement_ref: Option<SettlementId>,
    ) -> Result<TransactionId> {
        self.apply_redeem(
            amount,
            format!("Transfer to {counterparty}"),
            settlement_ref,
        )
        .await
    }

    /// Idempotent set-insert of a completed one-time action id.
    ///
    /// A second claim fails with `AlreadyCompleted` and performs no mutation.
    pub async fn mark_one_time_action_completed(&self, action_id: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if !state.completed_actions.insert(action_id.to_string()) {
                return Err(RewaError::AlreadyCompleted {
                    action_id: action_id.to_string(),
                });
            }
        }
        self.persist().await;
        Ok(())
    }

    /// Record the daily check-in for `today`, crediting the streak bonus.
    ///
    /// Streak and bonus computation is delegated to the streak engine; fails
    /// with `AlreadyClaimedToday` when already claimed (no mutation).
    pub async fn record_daily_checkin(&self, today: NaiveDate) -> Result<CheckinOutcome> {
        let (update, id) = {
            let mut state = self.state.write().await;
            let update: StreakUpdate = next_streak(state.last_claim_date, today, state.streak)?;
            // Credit first: it mutates nothing on failure, so a rejected
            // bonus leaves the streak fields untouched too.
            let id = credit(&mut state, update.bonus, "Daily Check-in".to_string(), None)?;
            state.last_claim_date = Some(today);
            state.streak = update.streak;
            (update, id)
        };
        self.committed().await;
        info!(streak = update.streak, bonus = update.bonus.value(), "daily check-in");
        Ok(CheckinOutcome {
            streak: update.streak,
            bonus: update.bonus,
            transaction: id,
        })
    }

    /// Consume the one-per-session lucky spin, crediting `prize`.
    pub async fn claim_spin(&self, prize: Amount) -> Result<TransactionId> {
        let id = {
            let mut state = self.state.write().await;
            if !state.spin_available {
                return Err(RewaError::SpinNotAvailable);
            }
            let id = credit(&mut state, prize, "Lucky Spin".to_string(), None)?;
            state.spin_available = false;
            id
        };
        self.committed().await;
        Ok(id)
    }

    /// Adopt the connected wallet's payment address as the account address.
    pub async fn adopt_address(&self, address: &str) {
        {
            let mut state = self.state.write().await;
            state.address = address.to_string();
        }
        self.persist().await;
    }

    /// Transition every currently Pending transaction to Confirmed.
    ///
    /// Idempotent; confirmation is a status-only transition, balances were
    /// committed at append time and are not re-validated. Returns the number
    /// confirmed.
    pub async fn confirm_due_sweep(&self) -> usize {
        let confirmed = {
            let mut state = self.state.write().await;
            state.transactions.confirm_all_pending()
        };
        if confirmed > 0 {
            info!(confirmed, "confirmation sweep");
            self.persist().await;
        }
        confirmed
    }

    /// Atomically replace the entire account with a fresh default.
    ///
    /// Any sweep still in flight against the prior state is invalidated.
    pub async fn reset(&self) -> AccountState {
        let fresh = AccountState::generate();
        {
            let mut state = self.state.write().await;
            *state = fresh.clone();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.persist().await;
        info!("account state reset");
        fresh
    }

    /// Post-commit hook for log mutations: write-through, then re-arm the
    /// deferred confirmation sweep.
    async fn committed(&self) {
        self.persist().await;
        self.arm_sweep();
    }

    /// Write-through persistence. Fire-and-forget: a failed write is logged,
    /// never surfaced, and never rolls back the committed mutation.
    async fn persist(&self) {
        let snapshot = self.state.read().await.clone();
        if let Err(err) = self.store.save(&snapshot).await {
            warn!(%err, "snapshot write failed");
        }
    }

    /// Re-arm the deferred sweep. A single sweep fires `confirm_delay` after
    /// the latest mutation and covers everything Pending at that moment.
    fn arm_sweep(&self) {
        let epoch = self.sweep_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.load(Ordering::SeqCst);
        let ledger = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ledger.confirm_delay).await;
            // Superseded by a later mutation: that sweep covers us too.
            if ledger.sweep_epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            // The captured state was replaced by a full reset.
            if ledger.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            ledger.confirm_due_sweep().await;
        });
    }
}

/// Apply a credit under the ledger write lock. Checked first, mutated after:
/// a returned error leaves `state` untouched.
fn credit(
    state: &mut AccountState,
    amount: Amount,
    description: String,
    settlement_ref: Option<SettlementId>,
) -> Result<TransactionId> {
    if amount.is_zero() {
        return Err(RewaError::InvalidAmount {
            message: "amount must be greater than zero".to_string(),
        });
    }
    let new_balance = state
        .balance
        .checked_add(amount)
        .ok_or_else(|| RewaError::InvalidAmount {
            message: "balance overflow".to_string(),
        })?;
    let new_earned =
        state
            .total_earned
            .checked_add(amount)
            .ok_or_else(|| RewaError::InvalidAmount {
                message: "total earned overflow".to_string(),
            })?;

    state.balance = new_balance;
    state.total_earned = new_earned;
    let tx = Transaction::pending(TxKind::Earn, amount, description, settlement_ref);
    let id = tx.id.clone();
    state.transactions.append(tx);
    Ok(id)
}

/// Apply a debit under the ledger write lock. Same commit discipline as
/// `credit`.
fn debit(
    state: &mut AccountState,
    cost: Amount,
    description: String,
    settlement_ref: Option<SettlementId>,
) -> Result<TransactionId> {
    if cost.is_zero() {
        return Err(RewaError::InvalidAmount {
            message: "amount must be greater than zero".to_string(),
        });
    }
    let new_balance =
        state
            .balance
            .checked_sub(cost)
            .ok_or_else(|| RewaError::InsufficientBalance {
                available: state.balance.value(),
                required: cost.value(),
            })?;
    let new_redeemed =
        state
            .total_redeemed
            .checked_add(cost)
            .ok_or_else(|| RewaError::InvalidAmount {
                message: "total redeemed overflow".to_string(),
            })?;

    state.balance = new_balance;
    state.total_redeemed = new_redeemed;
    let tx = Transaction::pending(TxKind::Redeem, cost, description, settlement_ref);
    let id = tx.id.clone();
    state.transactions.append(tx);
    Ok(id)
}
