//! Wire shapes of the external wallet protocol
//!
//! Address requests carry both payment- and ordinal-class purposes and a
//! preferred network without hard-binding to it, so a provider on a
//! mismatched network is not hard-blocked; the user reconciles manually.

use rewa_types::Amount;
use serde::{Deserialize, Serialize};

/// What an address will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressPurpose {
    Payment,
    Ordinals,
}

/// Network the request prefers. Advisory, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Default for Network {
    fn default() -> Self {
        Self::Testnet
    }
}

/// Request for the user's settlement addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRequest {
    pub purposes: Vec<AddressPurpose>,
    pub network: Network,
    /// Shown to the user in the provider's consent prompt
    pub message: String,
}

impl AddressRequest {
    /// The standard connect request: payment + ordinals, testnet-preferred.
    pub fn standard(message: impl Into<String>) -> Self {
        Self {
            purposes: vec![AddressPurpose::Payment, AddressPurpose::Ordinals],
            network: Network::Testnet,
            message: message.into(),
        }
    }
}

/// One resolved address from a connect response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub purpose: AddressPurpose,
    pub address: String,
}

/// Connect response: one address per granted purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub addresses: Vec<ResolvedAddress>,
}

impl AddressResponse {
    /// The payment-purpose address, if the provider granted one.
    pub fn payment_address(&self) -> Option<&str> {
        self.addresses
            .iter()
            .find(|a| a.purpose == AddressPurpose::Payment)
            .map(|a| a.address.as_str())
    }
}

/// One output of a composed payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecipient {
    pub address: String,
    pub amount: Amount,
}

/// A payment request for providers that only expose generic transaction
/// composition: exactly one output of `amount` to the counterparty. The
/// counterparty may be the sender's own address (demo deployments avoid
/// consuming finite test funds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub recipients: Vec<PaymentRecipient>,
    pub sender_address: String,
    pub network: Network,
}

impl PaymentRequest {
    pub fn single(
        sender_address: impl Into<String>,
        counterparty: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            recipients: vec![PaymentRecipient {
                address: counterparty.into(),
                amount,
            }],
            sender_address: sender_address.into(),
            network: Network::Testnet,
        }
    }
}
