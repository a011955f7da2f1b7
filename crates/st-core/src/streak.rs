//! Consecutive-day streak calculation.
//!
//! The streak walks backward from today one calendar day at a time, asking
//! the store for that exact day's sessions, and stops at the first day with
//! no positive-duration activity. The walk is deliberately a bounded linear
//! scan — one query per day, at most [`STREAK_LOOKBACK_DAYS`] of them —
//! rather than an indexed last-active-day lookup.

use chrono::{DateTime, Duration, Utc};

use crate::session::day_floor;
use crate::types::UserId;

/// Hard cap on how many days back the streak walk looks.
pub const STREAK_LOOKBACK_DAYS: i64 = 30;

/// Per-day session lookup, implemented by the store and by test fixtures.
pub trait DailySessions {
    /// The store's own error type; the engine propagates it untouched.
    type Error;

    /// Durations (in minutes) of every session whose stored `session_date`
    /// equals `date` exactly. `date` is always a midnight-UTC instant, which
    /// matches because `session_date` is midnight-truncated at write time.
    fn minutes_on(&self, user: &UserId, date: DateTime<Utc>) -> Result<Vec<i64>, Self::Error>;
}

/// Counts consecutive days with at least one positive-duration session,
/// walking backward from `now`'s day.
///
/// A day with no sessions, or only zero/negative durations, ends the walk
/// immediately — activity on earlier days past a gap never counts. The
/// result is in `0..=30`.
pub fn calculate_streak<S: DailySessions>(
    store: &S,
    user: &UserId,
    now: DateTime<Utc>,
) -> Result<u32, S::Error> {
    let today = day_floor(now);
    let mut streak = 0u32;

    for i in 0..STREAK_LOOKBACK_DAYS {
        let check_date = today - Duration::days(i);
        let minutes = store.minutes_on(user, check_date)?;
        if minutes.iter().any(|&m| m > 0) {
            streak += 1;
        } else {
            break;
        }
    }

    tracing::debug!(streak, user = %user, "streak computed");
    Ok(streak)
}
