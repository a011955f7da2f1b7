//! Subjects a user studies, each with an optional weekly goal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{SubjectId, UserId};

/// A subject a user studies.
///
/// `weekly_goal_hours` is optional: records imported from older data may
/// lack the field. Consumers substitute a default when reading it, and the
/// substituted value differs by call site (see [`crate::metrics`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier for this subject.
    pub id: SubjectId,
    /// The user who owns this subject.
    pub owner: UserId,
    /// Display name.
    pub name: String,
    /// Display color (hex string, e.g. `#6366F1`).
    pub color: String,
    /// Display icon.
    pub icon: String,
    /// Weekly study goal in hours, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_goal_hours: Option<f64>,
    /// When the subject was created.
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Daily share of the weekly goal, in minutes.
    ///
    /// A missing goal counts as one hour per week here, matching the
    /// dashboard's historical behavior for legacy records.
    pub fn daily_goal_minutes(&self) -> f64 {
        self.weekly_goal_hours.unwrap_or(1.0) * 60.0 / 7.0
    }
}
