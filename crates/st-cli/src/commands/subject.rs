//! Subject management commands.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use st_core::{Subject, SubjectId, UserId};
use st_db::Database;

/// Creates a subject and prints its generated ID.
pub fn add(
    db: &Database,
    user: &UserId,
    name: &str,
    color: &str,
    icon: &str,
    goal_hours: Option<f64>,
) -> Result<()> {
    let subject = db
        .create_subject(user, name, color, icon, goal_hours)
        .context("failed to create subject")?;
    println!("Added subject {} ({})", subject.name, subject.id);
    Ok(())
}

/// Lists the user's subjects.
pub fn list(db: &Database, user: &UserId, json: bool) -> Result<()> {
    let subjects = db
        .subjects_for_user(user)
        .context("failed to list subjects")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&subjects)?);
    } else {
        print!("{}", render_list(&subjects));
    }
    Ok(())
}

/// Deletes a subject, leaving its sessions in the log.
pub fn delete(db: &Database, user: &UserId, id: &str) -> Result<()> {
    let id = SubjectId::new(id).context("invalid subject ID")?;
    if db.delete_subject(user, &id)? {
        println!("Deleted subject {id}. Its logged sessions were kept.");
        Ok(())
    } else {
        bail!("subject not found: {id}")
    }
}

fn render_list(subjects: &[Subject]) -> String {
    let mut output = String::new();

    if subjects.is_empty() {
        writeln!(output, "No subjects yet.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'st subject add <name>' to create one.").unwrap();
        return output;
    }

    writeln!(output, "SUBJECTS").unwrap();
    writeln!(output, "────────").unwrap();
    for subject in subjects {
        let goal = subject
            .weekly_goal_hours
            .map_or_else(|| "(no goal)".to_string(), |h| format!("{h}h/week"));
        writeln!(
            output,
            "{} {:<20} {:>10}  {}",
            subject.icon, subject.name, goal, subject.id
        )
        .unwrap();
    }
    output
}
