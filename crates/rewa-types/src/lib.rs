//! REWA Types - Canonical domain types for the loyalty-token ledger
//!
//! This crate contains all foundational types for REWA with zero dependencies
//! on other rewa crates. It defines:
//!
//! - Identity types (TransactionId, SettlementId)
//! - The token `Amount` type
//! - Account state and the append-only transaction log
//! - Wallet connection types
//!
//! # Invariants
//!
//! 1. `balance == total_earned - total_redeemed` after every committed mutation
//! 2. Balances never go negative
//! 3. `total_earned` and `total_redeemed` never decrease
//! 4. Transactions are created Pending and confirmed at most once

pub mod account;
pub mod amount;
pub mod error;
pub mod identity;
pub mod transaction;
pub mod wallet;

pub use account::*;
pub use amount::*;
pub use error::*;
pub use identity::*;
pub use transaction::*;
pub use wallet::*;

/// Token metadata for the REWA loyalty token.
pub mod token {
    /// Display ticker.
    pub const TICKER: &str = "REWA";
    /// Hard cap on circulating supply.
    pub const MAX_SUPPLY: u64 = 1_000_000;
    /// Application identifier used in settlement memos and the snapshot key.
    pub const APP_ID: &str = "charmrewards";
}
