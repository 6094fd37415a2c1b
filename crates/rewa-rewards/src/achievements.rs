//! Achievement engine
//!
//! A fixed ordered catalog of stateless predicates evaluated against the
//! current account state on every query. No unlock flag is persisted, so an
//! achievement is non-sticky: if the underlying counters are externally
//! altered (e.g. a full reset), its membership in the unlocked set changes
//! with them.

use rewa_types::AccountState;

/// One entry in the achievement catalog.
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub check: fn(&AccountState) -> bool,
}

/// The fixed catalog, in display order.
pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: "first_earn",
        name: "First Steps",
        check: |s| !s.total_earned.is_zero(),
    },
    Achievement {
        id: "first_burn",
        name: "Big Spender",
        check: |s| !s.total_redeemed.is_zero(),
    },
    Achievement {
        id: "1k_club",
        name: "1K Club",
        check: |s| s.total_earned.value() >= 1000,
    },
    Achievement {
        id: "streak_3",
        name: "On Fire",
        check: |s| s.streak >= 3,
    },
    Achievement {
        id: "streak_7",
        name: "Dedicated",
        check: |s| s.streak >= 7,
    },
];

/// Ids of every achievement whose predicate holds for `state`, in catalog order.
pub fn unlocked(state: &AccountState) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|a| (a.check)(state))
        .map(|a| a.id)
        .collect()
}

/// Whether a specific achievement is currently unlocked.
pub fn is_unlocked(state: &AccountState, id: &str) -> bool {
    CATALOG
        .iter()
        .any(|a| a.id == id && (a.check)(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewa_types::Amount;

    #[test]
    fn fresh_account_unlocks_nothing() {
        let state = AccountState::generate();
        assert!(unlocked(&state).is_empty());
    }

    #[test]
    fn earning_unlocks_first_steps() {
        let mut state = AccountState::generate();
        state.total_earned = Amount::new(100);
        state.balance = Amount::new(100);
        assert_eq!(unlocked(&state), vec!["first_earn"]);
    }

    #[test]
    fn thousand_earned_unlocks_1k_club() {
        let mut state = AccountState::generate();
        state.total_earned = Amount::new(1000);
        state.balance = Amount::new(1000);
        assert!(is_unlocked(&state, "1k_club"));
        assert!(is_unlocked(&state, "first_earn"));
    }

    #[test]
    fn streak_tiers() {
        let mut state = AccountState::generate();
        state.streak = 3;
        assert!(is_unlocked(&state, "streak_3"));
        assert!(!is_unlocked(&state, "streak_7"));
        state.streak = 7;
        assert!(is_unlocked(&state, "streak_7"));
    }

    #[test]
    fn achievements_are_not_sticky() {
        let mut state = AccountState::generate();
        state.streak = 3;
        assert!(is_unlocked(&state, "streak_3"));
        state.streak = 0;
        assert!(!is_unlocked(&state, "streak_3"));
    }
}
