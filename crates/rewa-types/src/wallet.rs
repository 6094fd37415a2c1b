//! Wallet connection types
//!
//! The adapter owns no persistent state beyond the current connection; the
//! Ledger treats the connection as borrowed, read-only input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known wallet providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Xverse,
    Leather,
    Unisat,
    Okx,
}

impl ProviderId {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Xverse => "Xverse",
            Self::Leather => "Leather",
            Self::Unisat => "Unisat",
            Self::Okx => "OKX Wallet",
        }
    }

    pub const ALL: [ProviderId; 4] = [Self::Xverse, Self::Leather, Self::Unisat, Self::Okx];
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Current connection to an external wallet capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnection {
    pub connected: bool,
    pub provider: Option<ProviderId>,
    /// Payment address resolved at connect time
    pub address: Option<String>,
}

impl WalletConnection {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            provider: None,
            address: None,
        }
    }

    pub fn connected(provider: ProviderId, address: impl Into<String>) -> Self {
        Self {
            connected: true,
            provider: Some(provider),
            address: Some(address.into()),
        }
    }
}

impl Default for WalletConnection {
    fn default() -> Self {
        Self::disconnected()
    }
}
