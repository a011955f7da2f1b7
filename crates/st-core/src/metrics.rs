//! Aggregate metrics over subjects and study sessions.
//!
//! Everything here is a pure function over caller-supplied slices: the store
//! does the filtering (today's sessions by exact `session_date` match, the
//! weekly window by `start_time` lower bound) and these functions do the
//! arithmetic. No validation happens here — callers guarantee well-formed
//! records, and degenerate inputs (empty slices, zero goals, negative
//! durations) produce zero-valued results rather than errors.

use serde::Serialize;

use crate::session::StudySession;
use crate::subject::Subject;
use crate::types::SubjectId;

/// Today's progress toward one subject's daily goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProgress {
    pub subject_id: SubjectId,
    /// Minutes studied today for this subject.
    pub today_minutes: i64,
    /// The subject's weekly goal split evenly across 7 days, in minutes.
    pub daily_goal_minutes: f64,
    /// Percentage of the daily goal reached, capped at 100.
    pub percentage: f64,
}

/// The aggregate dashboard view for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub today_hours: f64,
    pub weekly_hours: f64,
    pub subject_count: usize,
    pub daily_goal_percentage: f64,
    pub subject_progress: Vec<SubjectProgress>,
}

/// Rounds to one decimal place.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Total minutes across a session set.
///
/// Callers pre-filter to the window they care about; this is a plain sum.
pub fn daily_total(sessions: &[StudySession]) -> i64 {
    sessions.iter().map(|s| s.duration_minutes).sum()
}

/// Total minutes across a trailing-week session set.
///
/// The window itself (midnight seven days ago, no upper bound) is the
/// store's query; the sum is identical to [`daily_total`] and kept separate
/// so each window has a named operation.
pub fn weekly_total(sessions: &[StudySession]) -> i64 {
    sessions.iter().map(|s| s.duration_minutes).sum()
}

/// Per-subject progress toward each daily goal, in input order.
///
/// The goal comparison is in *minutes*. A missing weekly goal counts as one
/// hour per week; a zero (or negative) daily goal yields 0% rather than a
/// division error. Percentages are rounded to one decimal and capped at 100.
#[allow(clippy::cast_precision_loss)]
pub fn per_subject_daily_progress(
    subjects: &[Subject],
    today_sessions: &[StudySession],
) -> Vec<SubjectProgress> {
    subjects
        .iter()
        .map(|subject| {
            let today_minutes: i64 = today_sessions
                .iter()
                .filter(|s| s.subject_id == subject.id)
                .map(|s| s.duration_minutes)
                .sum();
            let daily_goal_minutes = subject.daily_goal_minutes();
            let percentage = if daily_goal_minutes > 0.0 {
                round1(today_minutes as f64 / daily_goal_minutes * 100.0).min(100.0)
            } else {
                0.0
            };
            SubjectProgress {
                subject_id: subject.id.clone(),
                today_minutes,
                daily_goal_minutes,
                percentage,
            }
        })
        .collect()
}

/// Percentage of the combined daily goal reached today, across all subjects.
///
/// Unlike the per-subject figure this compares *hours*, and the hours value
/// is itself rounded to one decimal before dividing — both quirks of the
/// original dashboard, kept so the two figures keep reporting the same
/// numbers they always have. A missing weekly goal counts as zero here (not
/// one, as in the per-subject case). The result is not capped.
#[allow(clippy::cast_precision_loss)]
pub fn overall_daily_goal_percentage(subjects: &[Subject], today_total_minutes: i64) -> f64 {
    let today_hours = round1(today_total_minutes as f64 / 60.0);
    let total_daily_goal_hours: f64 = subjects
        .iter()
        .map(|s| s.weekly_goal_hours.unwrap_or(0.0))
        .sum::<f64>()
        / 7.0;
    if total_daily_goal_hours > 0.0 {
        round1(today_hours / total_daily_goal_hours * 100.0)
    } else {
        0.0
    }
}

/// Builds the full dashboard view from pre-filtered session sets.
#[allow(clippy::cast_precision_loss)]
pub fn dashboard_stats(
    subjects: &[Subject],
    today_sessions: &[StudySession],
    weekly_sessions: &[StudySession],
) -> DashboardStats {
    let total_today_minutes = daily_total(today_sessions);
    let stats = DashboardStats {
        today_hours: round1(total_today_minutes as f64 / 60.0),
        weekly_hours: round1(weekly_total(weekly_sessions) as f64 / 60.0),
        subject_count: subjects.len(),
        daily_goal_percentage: overall_daily_goal_percentage(subjects, total_today_minutes),
        subject_progress: per_subject_daily_progress(subjects, today_sessions),
    };
    tracing::debug!(
        today_minutes = total_today_minutes,
        subjects = stats.subject_count,
        "dashboard stats computed"
    );
    stats
}
