//! Core domain logic for the study tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Metrics: daily/weekly totals and goal-percentage views over sessions
//! - Streak: consecutive-day activity counting with a bounded lookback
//! - Chart series: per-subject time aggregation for display
//!
//! Everything is pure computation over data the caller supplies; storage
//! lives in `st-db` and the engine reaches it only through the
//! [`DailySessions`] seam.

pub mod chart;
pub mod goal;
pub mod metrics;
pub mod session;
pub mod streak;
pub mod subject;
pub mod types;

pub use chart::{ChartSeries, build_chart_series};
pub use goal::Goal;
pub use metrics::{
    DashboardStats, SubjectProgress, daily_total, dashboard_stats, overall_daily_goal_percentage,
    per_subject_daily_progress, weekly_total,
};
pub use session::{StudySession, day_floor};
pub use streak::{DailySessions, STREAK_LOOKBACK_DAYS, calculate_streak};
pub use subject::Subject;
pub use types::{GoalId, SessionId, SubjectId, UserId, ValidationError};
