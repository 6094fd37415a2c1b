//! Wallet adapter
//!
//! Normalizes the registered providers into one contract. The adapter owns
//! only the current `WalletConnection`; callers read it as a snapshot.

use crate::{AddressRequest, PaymentRequest, ProviderDescriptor, WalletProvider};
use rewa_types::{Amount, ProviderId, Result, RewaError, SettlementId, WalletConnection};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Consent message shown by providers on connect.
const CONNECT_MESSAGE: &str = "REWA - Loyalty Tokens";

/// One contract over heterogeneous wallet capabilities.
#[derive(Clone)]
pub struct WalletAdapter {
    providers: Arc<HashMap<ProviderId, Arc<dyn WalletProvider>>>,
    connection: Arc<RwLock<WalletConnection>>,
}

impl WalletAdapter {
    /// Build an adapter over an explicit provider registry.
    pub fn new(registry: Vec<Arc<dyn WalletProvider>>) -> Self {
        let providers = registry
            .into_iter()
            .map(|p| (p.id(), p))
            .collect::<HashMap<_, _>>();
        Self {
            providers: Arc::new(providers),
            connection: Arc::new(RwLock::new(WalletConnection::disconnected())),
        }
    }

    /// Finite, restartable sequence of provider descriptors, covering every
    /// known provider id. Unregistered providers report unavailable.
    pub fn list_providers(&self) -> Vec<ProviderDescriptor> {
        ProviderId::ALL
            .iter()
            .map(|id| ProviderDescriptor {
                id: *id,
                name: id.display_name().to_string(),
                available: self.providers.get(id).map(|p| p.available()).unwrap_or(false),
            })
            .collect()
    }

    /// Current connection snapshot.
    pub async fn connection(&self) -> WalletConnection {
        self.connection.read().await.clone()
    }

    /// Connect to a provider: request payment- and ordinal-class addresses
    /// and record the payment address as the active connection.
    pub async fn connect(&self, id: ProviderId) -> Result<WalletConnection> {
        let provider = self.providers.get(&id).filter(|p| p.available()).ok_or(
            RewaError::ProviderUnavailable {
                provider: id.display_name().to_string(),
            },
        )?;

        let response = provider
            .resolve_addresses(AddressRequest::standard(CONNECT_MESSAGE))
            .await?;
        let address = response
            .payment_address()
            .ok_or_else(|| RewaError::ConnectFailed {
                message: "provider granted no payment address".to_string(),
            })?
            .to_string();

        let connection = WalletConnection::connected(id, address);
        *self.connection.write().await = connection.clone();
        info!(provider = %id, "wallet connected");
        Ok(connection)
    }

    /// Drop the current connection.
    pub async fn disconnect(&self) {
        *self.connection.write().await = WalletConnection::disconnected();
        info!("wallet disconnected");
    }

    /// Request a payment of `amount` to `counterparty` from the connected
    /// address. Exactly one of resolve/reject is produced.
    pub async fn settle(&self, amount: Amount, counterparty: &str) -> Result<SettlementId> {
        let connection = self.connection.read().await.clone();
        let (provider_id, sender) = match (&connection.provider, &connection.address) {
            (Some(id), Some(addr)) if connection.connected => (*id, addr.clone()),
            _ => return Err(RewaError::WalletNotConnected),
        };
        let provider =
            self.providers
                .get(&provider_id)
                .ok_or(RewaError::ProviderUnavailable {
                    provider: provider_id.display_name().to_string(),
                })?;

        let request = PaymentRequest::single(sender, counterparty, amount);
        match provider.request_settlement(request).await {
            Ok(id) => {
                info!(provider = %provider_id, amount = amount.value(), settlement = %id, "settlement resolved");
                Ok(id)
            }
            Err(err) => {
                warn!(provider = %provider_id, amount = amount.value(), %err, "settlement rejected");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComposerWallet, DirectSendWallet, PromptScript, UserDecision};

    fn adapter() -> WalletAdapter {
        WalletAdapter::new(vec![
            Arc::new(ComposerWallet::new(ProviderId::Xverse, "tb1pxverse")),
            Arc::new(DirectSendWallet::new(ProviderId::Unisat, "tb1punisat")),
            Arc::new(ComposerWallet::new(ProviderId::Leather, "tb1pleather").not_installed()),
        ])
    }

    #[tokio::test]
    async fn list_providers_covers_all_known_ids() {
        let descriptors = adapter().list_providers();
        assert_eq!(descriptors.len(), ProviderId::ALL.len());
        let available: Vec<ProviderId> = descriptors
            .iter()
            .filter(|d| d.available)
            .map(|d| d.id)
            .collect();
        assert_eq!(available, vec![ProviderId::Xverse, ProviderId::Unisat]);
    }

    #[tokio::test]
    async fn connect_records_payment_address() {
        let adapter = adapter();
        let connection = adapter.connect(ProviderId::Xverse).await.unwrap();
        assert!(connection.connected);
        assert_eq!(connection.address.as_deref(), Some("tb1pxverse"));
        assert_eq!(adapter.connection().await, connection);
    }

    #[tokio::test]
    async fn connect_to_missing_provider_is_unavailable() {
        let adapter = adapter();
        for id in [ProviderId::Leather, ProviderId::Okx] {
            let result = adapter.connect(id).await;
            assert!(matches!(result, Err(RewaError::ProviderUnavailable { .. })));
        }
    }

    #[tokio::test]
    async fn settle_without_connection_fails() {
        let adapter = adapter();
        let result = adapter.settle(Amount::new(100), "tb1pcounterparty").await;
        assert!(matches!(result, Err(RewaError::WalletNotConnected)));
    }

    #[tokio::test]
    async fn settle_round_trip_yields_settlement_id() {
        let adapter = adapter();
        adapter.connect(ProviderId::Unisat).await.unwrap();
        let id = adapter.settle(Amount::new(1000), "tb1punisat").await.unwrap();
        assert!(id.as_str().starts_with("settle_"));
    }

    #[tokio::test]
    async fn user_rejection_propagates() {
        let script = PromptScript::approving();
        let adapter = WalletAdapter::new(vec![Arc::new(
            ComposerWallet::new(ProviderId::Xverse, "tb1pxverse").with_script(script.clone()),
        )]);
        adapter.connect(ProviderId::Xverse).await.unwrap();
        script.set_settle(UserDecision::Reject).await;
        let result = adapter.settle(Amount::new(100), "tb1pxverse").await;
        assert!(matches!(result, Err(RewaError::UserRejected)));
    }

    #[tokio::test]
    async fn disconnect_clears_connection() {
        let adapter = adapter();
        adapter.connect(ProviderId::Xverse).await.unwrap();
        adapter.disconnect().await;
        assert!(!adapter.connection().await.connected);
    }
}
