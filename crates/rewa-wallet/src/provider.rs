//! The wallet provider contract
//!
//! Concrete providers are variants implementing this same interface.
//! Availability is an explicit capability query that mutates nothing.

use crate::{AddressRequest, AddressResponse, PaymentRequest};
use rewa_types::{ProviderId, Result, SettlementId};
use serde::{Deserialize, Serialize};

/// Descriptor produced by `WalletAdapter::list_providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub name: String,
    pub available: bool,
}

/// Contract every wallet provider implements.
///
/// Every method resolves or fails exactly once. Failures map onto the
/// adapter-level taxonomy: `Cancelled`/`ConnectFailed` from
/// `resolve_addresses`, `UserRejected`/`SettlementFailed` from
/// `request_settlement`.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Probe whether the capability is present, without mutating anything.
    fn available(&self) -> bool;

    /// Ask the user for settlement addresses.
    async fn resolve_addresses(&self, request: AddressRequest) -> Result<AddressResponse>;

    /// Request a payment; resolves with an opaque settlement id.
    async fn request_settlement(&self, request: PaymentRequest) -> Result<SettlementId>;
}
