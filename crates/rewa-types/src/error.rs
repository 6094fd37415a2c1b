//! Error types for REWA
//!
//! Precondition failures are rejected before any state mutation, so a
//! returned error always means the account is unchanged. `UserCancelled` is
//! informational, not a fault.

use thiserror::Error;

/// Result type for REWA operations
pub type Result<T> = std::result::Result<T, RewaError>;

/// REWA error types
#[derive(Debug, Clone, Error)]
pub enum RewaError {
    // ========================================================================
    // Precondition failures (rejected client-side, no mutation)
    // ========================================================================
    /// Balance too low for the requested debit
    #[error("Insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: u64, required: u64 },

    /// Zero or otherwise unusable amount
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    /// The daily check-in was already claimed today
    #[error("Daily check-in already claimed today")]
    AlreadyClaimedToday,

    /// A one-time action was claimed a second time
    #[error("One-time action {action_id} already completed")]
    AlreadyCompleted { action_id: String },

    /// The lucky spin was already used this session
    #[error("Lucky spin is not available")]
    SpinNotAvailable,

    // ========================================================================
    // Wallet / settlement failures (external, account untouched)
    // ========================================================================
    /// The user dismissed the connect prompt; not a fault
    #[error("Connection cancelled by user")]
    Cancelled,

    /// The requested provider is not installed or not registered
    #[error("Wallet provider {provider} is unavailable")]
    ProviderUnavailable { provider: String },

    /// Provider API error during connect
    #[error("Wallet connection failed: {message}")]
    ConnectFailed { message: String },

    /// A settlement was attempted with no connected wallet
    #[error("No wallet is connected")]
    WalletNotConnected,

    /// The user declined the payment prompt
    #[error("Settlement rejected by user")]
    UserRejected,

    /// Any other settlement failure, surfaced with the provider's message
    #[error("Settlement failed: {message}")]
    SettlementFailed { message: String },

    // ========================================================================
    // Persistence (recovered silently on read, logged on write)
    // ========================================================================
    /// Snapshot write failed; never coupled to a ledger mutation
    #[error("Failed to persist account snapshot: {message}")]
    PersistenceWriteFailure { message: String },
}

impl RewaError {
    /// Whether this error represents an explicit user choice rather than a fault.
    pub fn is_user_choice(&self) -> bool {
        matches!(self, Self::Cancelled | Self::UserRejected)
    }
}
