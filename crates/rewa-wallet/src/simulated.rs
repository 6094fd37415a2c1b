//! Simulated wallet providers
//!
//! The system is a client-local simulator: no real extension or network sits
//! behind a provider, so each known provider is backed by a scriptable
//! simulation of the user's consent prompts. Two capability shapes exist:
//!
//! - `ComposerWallet`: only a generic transaction-composition request
//!   (Xverse / sats-connect shaped); a settlement specifies one output.
//! - `DirectSendWallet`: a one-call "send" capability (Unisat shaped);
//!   a settlement is a single round trip.

use crate::{AddressRequest, AddressResponse, PaymentRequest, ResolvedAddress, WalletProvider};
use rewa_types::{ProviderId, Result, RewaError, SettlementId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// How the simulated user answers the next prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDecision {
    /// Grant the request
    Approve,
    /// Dismiss the prompt (connect only; maps to `Cancelled`)
    Cancel,
    /// Decline the payment (settle only; maps to `UserRejected`)
    Reject,
    /// Provider-side failure with a message
    Fail(String),
}

/// Scriptable prompt behavior shared by the simulated providers.
#[derive(Clone)]
pub struct PromptScript {
    connect: Arc<RwLock<UserDecision>>,
    settle: Arc<RwLock<UserDecision>>,
}

impl PromptScript {
    pub fn approving() -> Self {
        Self {
            connect: Arc::new(RwLock::new(UserDecision::Approve)),
            settle: Arc::new(RwLock::new(UserDecision::Approve)),
        }
    }

    pub async fn set_connect(&self, decision: UserDecision) {
        *self.connect.write().await = decision;
    }

    pub async fn set_settle(&self, decision: UserDecision) {
        *self.settle.write().await = decision;
    }
}

impl Default for PromptScript {
    fn default() -> Self {
        Self::approving()
    }
}

fn connect_error(decision: &UserDecision) -> Option<RewaError> {
    match decision {
        UserDecision::Approve => None,
        UserDecision::Cancel => Some(RewaError::Cancelled),
        UserDecision::Reject => Some(RewaError::Cancelled),
        UserDecision::Fail(msg) => Some(RewaError::ConnectFailed {
            message: msg.clone(),
        }),
    }
}

fn settle_error(decision: &UserDecision) -> Option<RewaError> {
    match decision {
        UserDecision::Approve => None,
        UserDecision::Reject | UserDecision::Cancel => Some(RewaError::UserRejected),
        UserDecision::Fail(msg) => Some(RewaError::SettlementFailed {
            message: msg.clone(),
        }),
    }
}

/// Provider exposing only generic transaction composition.
pub struct ComposerWallet {
    id: ProviderId,
    address: String,
    installed: bool,
    script: PromptScript,
}

impl ComposerWallet {
    pub fn new(id: ProviderId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            installed: true,
            script: PromptScript::approving(),
        }
    }

    pub fn with_script(mut self, script: PromptScript) -> Self {
        self.script = script;
        self
    }

    /// Mark the capability as absent; `available()` then reports false.
    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }
}

#[async_trait::async_trait]
impl WalletProvider for ComposerWallet {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn available(&self) -> bool {
        self.installed
    }

    async fn resolve_addresses(&self, request: AddressRequest) -> Result<AddressResponse> {
        debug!(provider = %self.id, purposes = request.purposes.len(), "address request");
        if let Some(err) = connect_error(&*self.script.connect.read().await) {
            return Err(err);
        }
        // One address per requested purpose; the simulation reuses the same
        // key for payment and ordinals.
        Ok(AddressResponse {
            addresses: request
                .purposes
                .into_iter()
                .map(|purpose| ResolvedAddress {
                    purpose,
                    address: self.address.clone(),
                })
                .collect(),
        })
    }

    async fn request_settlement(&self, request: PaymentRequest) -> Result<SettlementId> {
        if let Some(err) = settle_error(&*self.script.settle.read().await) {
            return Err(err);
        }
        let total: u64 = request.recipients.iter().map(|r| r.amount.value()).sum();
        let id = SettlementId::new();
        info!(provider = %self.id, total, settlement = %id, "composed settlement signed");
        Ok(id)
    }
}

/// Provider exposing a one-call "send" capability.
pub struct DirectSendWallet {
    id: ProviderId,
    address: String,
    installed: bool,
    script: PromptScript,
}

impl DirectSendWallet {
    pub fn new(id: ProviderId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            installed: true,
            script: PromptScript::approving(),
        }
    }

    pub fn with_script(mut self, script: PromptScript) -> Self {
        self.script = script;
        self
    }

    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }
}

#[async_trait::async_trait]
impl WalletProvider for DirectSendWallet {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn available(&self) -> bool {
        self.installed
    }

    async fn resolve_addresses(&self, request: AddressRequest) -> Result<AddressResponse> {
        debug!(provider = %self.id, "account request");
        if let Some(err) = connect_error(&*self.script.connect.read().await) {
            return Err(err);
        }
        // Direct-send wallets expose a single account; it serves every purpose.
        Ok(AddressResponse {
            addresses: request
                .purposes
                .into_iter()
                .map(|purpose| ResolvedAddress {
                    purpose,
                    address: self.address.clone(),
                })
                .collect(),
        })
    }

    async fn request_settlement(&self, request: PaymentRequest) -> Result<SettlementId> {
        // The one-call send capability takes exactly one recipient.
        let recipient = match request.recipients.as_slice() {
            [single] => single,
            _ => {
                return Err(RewaError::SettlementFailed {
                    message: "direct-send provider supports exactly one recipient".to_string(),
                })
            }
        };
        if let Some(err) = settle_error(&*self.script.settle.read().await) {
            return Err(err);
        }
        let id = SettlementId::new();
        info!(
            provider = %self.id,
            amount = recipient.amount.value(),
            to = %recipient.address,
            settlement = %id,
            "direct send accepted"
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewa_types::Amount;

    #[tokio::test]
    async fn composer_resolves_one_address_per_purpose() {
        let wallet = ComposerWallet::new(ProviderId::Xverse, "tb1pcomposer");
        let response = wallet
            .resolve_addresses(AddressRequest::standard("REWA - Loyalty Tokens"))
            .await
            .unwrap();
        assert_eq!(response.addresses.len(), 2);
        assert_eq!(response.payment_address(), Some("tb1pcomposer"));
    }

    #[tokio::test]
    async fn cancelled_connect_maps_to_cancelled() {
        let script = PromptScript::approving();
        script.set_connect(UserDecision::Cancel).await;
        let wallet = ComposerWallet::new(ProviderId::Xverse, "tb1pcomposer").with_script(script);
        let result = wallet
            .resolve_addresses(AddressRequest::standard("REWA"))
            .await;
        assert!(matches!(result, Err(RewaError::Cancelled)));
    }

    #[tokio::test]
    async fn rejected_settlement_maps_to_user_rejected() {
        let script = PromptScript::approving();
        script.set_settle(UserDecision::Reject).await;
        let wallet = DirectSendWallet::new(ProviderId::Unisat, "tb1pdirect").with_script(script);
        let request = PaymentRequest::single("tb1pdirect", "tb1pdirect", Amount::new(100));
        let result = wallet.request_settlement(request).await;
        assert!(matches!(result, Err(RewaError::UserRejected)));
    }

    #[tokio::test]
    async fn direct_send_refuses_multi_output() {
        let wallet = DirectSendWallet::new(ProviderId::Unisat, "tb1pdirect");
        let mut request = PaymentRequest::single("tb1pdirect", "tb1pdirect", Amount::new(100));
        request.recipients.push(crate::PaymentRecipient {
            address: "tb1pother".to_string(),
            amount: Amount::new(50),
        });
        let result = wallet.request_settlement(request).await;
        assert!(matches!(result, Err(RewaError::SettlementFailed { .. })));
    }
}
