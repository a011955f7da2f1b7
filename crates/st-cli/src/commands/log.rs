//! Session logging command.

use anyhow::{Context, Result};
use st_core::{SubjectId, UserId};
use st_db::Database;

use super::util::format_minutes;

/// Appends one study session to the log.
///
/// The subject ID is not checked against the subject table; a session logged
/// against a since-deleted subject is stored anyway and simply drops out of
/// per-subject views.
pub fn run(db: &Database, user: &UserId, subject_id: &str, minutes: i64) -> Result<()> {
    let subject_id = SubjectId::new(subject_id).context("invalid subject ID")?;
    let session = db
        .log_session(user, &subject_id, minutes)
        .context("failed to log session")?;

    println!(
        "Logged {} for subject {} (session {})",
        format_minutes(minutes),
        subject_id,
        session.id
    );
    Ok(())
}
