//! Long-term goals, tracked alongside subjects but not fed to the metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GoalId, UserId};

/// A milestone a user is working toward.
///
/// Goals live next to subjects and sessions but the metrics engine never
/// reads them; they are listed and completed through the CLI only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub owner: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target date at midnight UTC.
    pub target_date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}
