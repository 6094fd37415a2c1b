//! Daily check-in streak engine
//!
//! Consecutive-day claims grow the streak by one; any gap of two or more
//! days (or no prior claim) resets it to one. The bonus is an arithmetic
//! progression starting at 25 on day 1, capped at 175 from day 7 onward.

use chrono::{Days, NaiveDate};
use rewa_types::{Amount, Result, RewaError};
use serde::{Deserialize, Serialize};

/// Bonus for a day-1 streak.
pub const DAILY_BASE: u64 = 25;
/// Per-day increment.
pub const DAILY_STEP: u64 = 25;
/// Ceiling reached from day 7 onward.
pub const DAILY_CAP: u64 = 175;

/// Outcome of a streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    /// The new consecutive-day counter
    pub streak: u32,
    /// Tokens to credit for this check-in
    pub bonus: Amount,
}

/// Compute the next streak and bonus for a check-in on `today`.
///
/// Fails with `AlreadyClaimedToday` when `last_claim` is `today`; performs no
/// side effects either way.
pub fn next_streak(
    last_claim: Option<NaiveDate>,
    today: NaiveDate,
    prior_streak: u32,
) -> Result<StreakUpdate> {
    if last_claim == Some(today) {
        return Err(RewaError::AlreadyClaimedToday);
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    let streak = if last_claim.is_some() && last_claim == yesterday {
        prior_streak + 1
    } else {
        1
    };

    Ok(StreakUpdate {
        streak,
        bonus: Amount::new(bonus_for(streak)),
    })
}

/// Bonus for a given streak day: `min(25 + 25 * (streak - 1), 175)`.
pub fn bonus_for(streak: u32) -> u64 {
    (DAILY_BASE + DAILY_STEP * (streak.saturating_sub(1)) as u64).min(DAILY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_claim_is_rejected() {
        let today = date(2026, 8, 27);
        let result = next_streak(Some(today), today, 4);
        assert!(matches!(result, Err(RewaError::AlreadyClaimedToday)));
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let update = next_streak(Some(date(2026, 8, 26)), date(2026, 8, 27), 2).unwrap();
        assert_eq!(update.streak, 3);
        assert_eq!(update.bonus, Amount::new(75));
    }

    #[test]
    fn gap_resets_streak() {
        let update = next_streak(Some(date(2026, 8, 24)), date(2026, 8, 27), 9).unwrap();
        assert_eq!(update.streak, 1);
        assert_eq!(update.bonus, Amount::new(25));
    }

    #[test]
    fn first_ever_claim_starts_at_one() {
        let update = next_streak(None, date(2026, 8, 27), 0).unwrap();
        assert_eq!(update.streak, 1);
        assert_eq!(update.bonus, Amount::new(25));
    }

    #[test]
    fn bonus_caps_at_175_from_day_seven() {
        assert_eq!(bonus_for(1), 25);
        assert_eq!(bonus_for(6), 150);
        assert_eq!(bonus_for(7), 175);
        assert_eq!(bonus_for(30), 175);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let update = next_streak(Some(date(2026, 8, 31)), date(2026, 9, 1), 5).unwrap();
        assert_eq!(update.streak, 6);
    }
}
