//! Immutable study-session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{SessionId, SubjectId, UserId};

/// One recorded block of study time.
///
/// Sessions form an append-only log: once written they are never updated.
///
/// `session_date` is the *creation* instant truncated to midnight UTC. It is
/// derived by the store at write time, not supplied by callers, so a session
/// logged just after midnight for studying done the evening before lands on
/// the new day. That is long-standing behavior and date-keyed queries (today
/// view, streak) depend on matching it exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    /// Unique identifier for this session.
    pub id: SessionId,
    /// The user who recorded this session.
    pub owner: UserId,
    /// The subject studied. Not referentially enforced: the subject may have
    /// been deleted since, in which case per-subject views skip the session.
    pub subject_id: SubjectId,
    /// When the session started.
    pub start_time: DateTime<Utc>,
    /// Length of the session in minutes.
    pub duration_minutes: i64,
    /// Creation day at midnight UTC. Queried by exact equality.
    pub session_date: DateTime<Utc>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Truncates a timestamp to midnight UTC.
///
/// Used for `session_date` derivation, the weekly window's lower bound, and
/// the streak walk.
pub fn day_floor(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}
