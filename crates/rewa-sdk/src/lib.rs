//! REWA SDK - the guarded intent surface
//!
//! A UI intent (`earn`, `redeem`, `transfer`, `checkin`, `spin`, claim a
//! one-time action) goes through a `RewardsSession`, which gates every
//! externally backed balance change behind the wallet adapter: the ledger
//! effect is applied only together with a successful settlement response,
//! never speculatively before it. Settlements pay to the holder's own
//! address so demo deployments do not consume finite test funds.

pub mod catalog;

pub use catalog::*;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rewa_ledger::{CheckinOutcome, Ledger};
use rewa_rewards::achievements;
use rewa_types::{
    AccountState, Amount, ProviderId, Result, RewaError, Transaction, TransactionId,
    WalletConnection,
};
use rewa_wallet::{ProviderDescriptor, WalletAdapter};
use tracing::info;

/// One user session over the ledger and a wallet adapter.
#[derive(Clone)]
pub struct RewardsSession {
    adapter: WalletAdapter,
    ledger: Ledger,
}

impl RewardsSession {
    pub fn new(adapter: WalletAdapter, ledger: Ledger) -> Self {
        Self { adapter, ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ------------------------------------------------------------------
    // Wallet
    // ------------------------------------------------------------------

    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        self.adapter.list_providers()
    }

    pub async fn connection(&self) -> WalletConnection {
        self.adapter.connection().await
    }

    /// Connect a wallet and adopt its payment address as the account address.
    pub async fn connect_wallet(&self, id: ProviderId) -> Result<WalletConnection> {
        let connection = self.adapter.connect(id).await?;
        if let Some(address) = &connection.address {
            self.ledger.adopt_address(address).await;
        }
        Ok(connection)
    }

    pub async fn disconnect_wallet(&self) {
        self.adapter.disconnect().await;
    }

    // ------------------------------------------------------------------
    // Settlement-backed intents
    // ------------------------------------------------------------------

    /// Mint tokens, backed by a settlement to the holder's own address.
    ///
    /// The amount check runs before the settlement so the user is never
    /// prompted to sign a payment the ledger would reject.
    pub async fn earn(&self, amount: Amount) -> Result<TransactionId> {
        Self::require_nonzero(amount)?;
        let settlement = self.settle_to_self(amount).await?;
        let id = self
            .ledger
            .apply_earn(
                amount,
                format!("Mint {} {}", amount.value(), rewa_types::token::TICKER),
                Some(settlement),
            )
            .await?;
        info!(amount = amount.value(), tx = %id, "earn intent committed");
        Ok(id)
    }

    /// Redeem a reward: precondition-checked, then settled, then debited.
    ///
    /// The balance check runs before the settlement so the user is never
    /// prompted to sign a payment the ledger would reject.
    pub async fn redeem_reward(&self, reward: &Reward) -> Result<TransactionId> {
        let cost = reward.cost_amount();
        let balance = self.ledger.balance().await;
        if balance < cost {
            return Err(RewaError::InsufficientBalance {
                available: balance.value(),
                required: cost.value(),
            });
        }
        let settlement = self.settle_to_self(cost).await?;
        let id = self
            .ledger
            .apply_redeem(cost, reward.name, Some(settlement))
            .await?;
        info!(reward = reward.id, tx = %id, "reward redeemed");
        Ok(id)
    }

    /// Transfer tokens to an off-system counterparty (local debit only).
    ///
    /// Same guard discipline as `earn`: preconditions first, settlement
    /// second, ledger debit last.
    pub async fn transfer(&self, amount: Amount, counterparty: &str) -> Result<TransactionId> {
        Self::require_nonzero(amount)?;
        let balance = self.ledger.balance().await;
        if balance < amount {
            return Err(RewaError::InsufficientBalance {
                available: balance.value(),
                required: amount.value(),
            });
        }
        let settlement = self.adapter.settle(amount, counterparty).await?;
        self.ledger
            .apply_transfer(amount, counterparty, Some(settlement))
            .await
    }

    fn require_nonzero(amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Err(RewaError::InvalidAmount {
                message: "amount must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    async fn settle_to_self(&self, amount: Amount) -> Result<rewa_types::SettlementId> {
        let connection = self.adapter.connection().await;
        let self_address = connection.address.ok_or(RewaError::WalletNotConnected)?;
        self.adapter.settle(amount, &self_address).await
    }

    // ------------------------------------------------------------------
    // Local intents (no external settlement)
    // ------------------------------------------------------------------

    pub async fn daily_checkin(&self, today: NaiveDate) -> Result<CheckinOutcome> {
        self.ledger.record_daily_checkin(today).await
    }

    /// Draw a prize uniformly from the spin table; one spin per session.
    pub async fn lucky_spin(&self) -> Result<(Amount, TransactionId)> {
        let prize = {
            let mut rng = rand::thread_rng();
            Amount::new(*SPIN_PRIZES.choose(&mut rng).unwrap_or(&SPIN_PRIZES[0]))
        };
        let id = self.ledger.claim_spin(prize).await?;
        Ok((prize, id))
    }

    /// Claim a one-time earn action: mark it completed, then credit.
    pub async fn claim_action(&self, action: &EarnAction) -> Result<TransactionId> {
        self.ledger.mark_one_time_action_completed(action.id).await?;
        self.ledger
            .apply_earn(action.reward_amount(), action.name, None)
            .await
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn snapshot(&self) -> AccountState {
        self.ledger.snapshot().await
    }

    pub async fn history(&self, limit: usize) -> Vec<Transaction> {
        self.ledger.snapshot().await.transactions.recent(limit)
    }

    /// Currently unlocked achievement ids, recomputed from canonical state.
    pub async fn unlocked_achievements(&self) -> Vec<&'static str> {
        achievements::unlocked(&self.ledger.snapshot().await)
    }

    /// Replace the whole account with a fresh default.
    pub async fn reset(&self) -> AccountState {
        self.ledger.reset().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewa_store::InMemoryStore;
    use rewa_types::TxStatus;
    use rewa_wallet::{ComposerWallet, DirectSendWallet, PromptScript, UserDecision};
    use std::sync::Arc;
    use std::time::Duration;

    async fn session_with_script(script: PromptScript) -> RewardsSession {
        let adapter = WalletAdapter::new(vec![
            Arc::new(ComposerWallet::new(ProviderId::Xverse, "tb1pxverse").with_script(script)),
            Arc::new(DirectSendWallet::new(ProviderId::Unisat, "tb1punisat")),
        ]);
        let ledger = Ledger::open(Arc::new(InMemoryStore::new()))
            .await
            .with_confirm_delay(Duration::from_millis(40));
        RewardsSession::new(adapter, ledger)
    }

    async fn connected_session() -> RewardsSession {
        let session = session_with_script(PromptScript::approving()).await;
        session.connect_wallet(ProviderId::Xverse).await.unwrap();
        session
    }

    #[tokio::test]
    async fn connect_adopts_the_payment_address() {
        let session = connected_session().await;
        assert_eq!(session.snapshot().await.address, "tb1pxverse");
    }

    #[tokio::test]
    async fn earn_settles_then_credits_with_reference() {
        let session = connected_session().await;
        let id = session.earn(Amount::new(1000)).await.unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.balance, Amount::new(1000));
        let tx = state.transactions.find(&id).unwrap();
        assert!(tx.settlement_ref.is_some());
        assert_eq!(tx.status, TxStatus::Pending);
        assert!(tx.description.contains("1000"));
    }

    #[tokio::test]
    async fn earn_without_connection_is_rejected() {
        let session = session_with_script(PromptScript::approving()).await;
        let result = session.earn(Amount::new(1000)).await;
        assert!(matches!(result, Err(RewaError::WalletNotConnected)));
        assert!(session.snapshot().await.balance.is_zero());
    }

    #[tokio::test]
    async fn rejected_settlement_leaves_the_account_untouched() {
        let script = PromptScript::approving();
        let session = session_with_script(script.clone()).await;
        session.connect_wallet(ProviderId::Xverse).await.unwrap();

        script.set_settle(UserDecision::Reject).await;
        let result = session.earn(Amount::new(1000)).await;
        assert!(matches!(result, Err(RewaError::UserRejected)));

        let state = session.snapshot().await;
        assert!(state.balance.is_zero());
        assert!(state.transactions.is_empty());
    }

    #[tokio::test]
    async fn zero_earn_is_rejected_before_prompting() {
        let script = PromptScript::approving();
        let session = session_with_script(script.clone()).await;
        session.connect_wallet(ProviderId::Xverse).await.unwrap();

        // The wallet would fail loudly if asked; the precondition fires first.
        script
            .set_settle(UserDecision::Fail("must not be called".to_string()))
            .await;
        let result = session.earn(Amount::zero()).await;
        assert!(matches!(result, Err(RewaError::InvalidAmount { .. })));
        assert!(session.snapshot().await.transactions.is_empty());
    }

    #[tokio::test]
    async fn zero_transfer_is_rejected_before_prompting() {
        let script = PromptScript::approving();
        let session = session_with_script(script.clone()).await;
        session.connect_wallet(ProviderId::Xverse).await.unwrap();
        session.earn(Amount::new(100)).await.unwrap();

        script
            .set_settle(UserDecision::Fail("must not be called".to_string()))
            .await;
        let result = session.transfer(Amount::zero(), "tb1pfriend").await;
        assert!(matches!(result, Err(RewaError::InvalidAmount { .. })));
        assert_eq!(session.snapshot().await.balance, Amount::new(100));
    }

    #[tokio::test]
    async fn redeem_checks_balance_before_prompting() {
        let script = PromptScript::approving();
        let session = session_with_script(script.clone()).await;
        session.connect_wallet(ProviderId::Xverse).await.unwrap();
        session.earn(Amount::new(150)).await.unwrap();

        // Even an approving wallet is never asked: the precondition fails first.
        script
            .set_settle(UserDecision::Fail("must not be called".to_string()))
            .await;
        let reward = find_reward("r1").unwrap(); // costs 200
        let result = session.redeem_reward(reward).await;
        assert!(matches!(result, Err(RewaError::InsufficientBalance { .. })));

        let state = session.snapshot().await;
        assert_eq!(state.balance, Amount::new(150));
        assert_eq!(state.transactions.len(), 1);
    }

    #[tokio::test]
    async fn redeem_round_trip() {
        let session = connected_session().await;
        session.earn(Amount::new(1000)).await.unwrap();
        let reward = find_reward("r3").unwrap(); // $5 Credit, 500
        let id = session.redeem_reward(reward).await.unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.balance, Amount::new(500));
        assert_eq!(state.total_redeemed, Amount::new(500));
        let tx = state.transactions.find(&id).unwrap();
        assert_eq!(tx.description, "$5 Credit");
        assert!(state.invariant_holds());
    }

    #[tokio::test]
    async fn transfer_debits_locally() {
        let session = connected_session().await;
        session.earn(Amount::new(1000)).await.unwrap();
        session
            .transfer(Amount::new(400), "tb1pfriend")
            .await
            .unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.balance, Amount::new(600));
        assert!(state.invariant_holds());
    }

    #[tokio::test]
    async fn claim_action_credits_once() {
        let session = connected_session().await;
        let action = find_action("connect_wallet").unwrap();
        session.claim_action(action).await.unwrap();
        assert_eq!(session.snapshot().await.balance, Amount::new(500));

        let result = session.claim_action(action).await;
        assert!(matches!(result, Err(RewaError::AlreadyCompleted { .. })));
        assert_eq!(session.snapshot().await.balance, Amount::new(500));
    }

    #[tokio::test]
    async fn lucky_spin_draws_from_the_prize_table() {
        let session = connected_session().await;
        let (prize, _) = session.lucky_spin().await.unwrap();
        assert!(SPIN_PRIZES.contains(&prize.value()));
        assert_eq!(session.snapshot().await.balance, prize);

        let result = session.lucky_spin().await;
        assert!(matches!(result, Err(RewaError::SpinNotAvailable)));
    }

    #[tokio::test]
    async fn achievements_follow_the_counters() {
        let session = connected_session().await;
        assert!(session.unlocked_achievements().await.is_empty());

        session.earn(Amount::new(1000)).await.unwrap();
        let unlocked = session.unlocked_achievements().await;
        assert!(unlocked.contains(&"first_earn"));
        assert!(unlocked.contains(&"1k_club"));

        session.reset().await;
        assert!(session.unlocked_achievements().await.is_empty());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_bounded() {
        let session = connected_session().await;
        session.earn(Amount::new(100)).await.unwrap();
        session.earn(Amount::new(200)).await.unwrap();
        session.earn(Amount::new(300)).await.unwrap();

        let history = session.history(2).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, 300);
        assert_eq!(history[1].amount, 200);
    }
}
