//! REWA Wallet - one contract over heterogeneous wallet providers
//!
//! External wallet capabilities differ: some expose a one-call "send", others
//! only a generic transaction-composition request. This crate normalizes them
//! behind a single explicit interface:
//!
//! - list available providers (explicit capability query, no ambient global
//!   inspection)
//! - connect (resolve the user's settlement addresses)
//! - settle (request a payment, yielding an opaque settlement id)
//!
//! Every provider call resolves or rejects exactly once - never a silent
//! no-op, never both.

pub mod adapter;
pub mod protocol;
pub mod provider;
pub mod simulated;

pub use adapter::*;
pub use protocol::*;
pub use provider::*;
pub use simulated::*;
