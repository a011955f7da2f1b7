//! Goal management commands.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use st_core::{Goal, GoalId, UserId};
use st_db::Database;

/// Creates a goal targeting `target_date` (stored as midnight UTC).
pub fn add(
    db: &Database,
    user: &UserId,
    title: &str,
    description: Option<&str>,
    target_date: NaiveDate,
) -> Result<()> {
    let target = target_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    let goal = db
        .create_goal(user, title, description, target)
        .context("failed to create goal")?;
    println!("Added goal {} ({})", goal.title, goal.id);
    Ok(())
}

/// Lists the user's goals.
pub fn list(db: &Database, user: &UserId, json: bool) -> Result<()> {
    let goals = db.goals_for_user(user).context("failed to list goals")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
    } else {
        print!("{}", render_list(&goals));
    }
    Ok(())
}

/// Marks a goal completed.
pub fn complete(db: &Database, user: &UserId, id: &str) -> Result<()> {
    let id = GoalId::new(id).context("invalid goal ID")?;
    if db.complete_goal(user, &id)? {
        println!("Completed goal {id}.");
        Ok(())
    } else {
        bail!("goal not found: {id}")
    }
}

fn render_list(goals: &[Goal]) -> String {
    let mut output = String::new();

    if goals.is_empty() {
        writeln!(output, "No goals yet.").unwrap();
        return output;
    }

    writeln!(output, "GOALS").unwrap();
    writeln!(output, "─────").unwrap();
    for goal in goals {
        let mark = if goal.is_completed { "x" } else { " " };
        writeln!(
            output,
            "[{mark}] {:<30} due {}  {}",
            goal.title,
            goal.target_date.format("%Y-%m-%d"),
            goal.id
        )
        .unwrap();
    }
    output
}
