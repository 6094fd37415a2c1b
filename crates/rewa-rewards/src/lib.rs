//! REWA Rewards - Pure derivation logic
//!
//! Streaks and achievements are derived, never stored authority:
//! the streak engine computes the next counter and bonus from two dates,
//! and the achievement engine recomputes the unlocked set from the current
//! account state on every query. Both are deterministic and side-effect free.

pub mod achievements;
pub mod streak;

pub use achievements::*;
pub use streak::*;
