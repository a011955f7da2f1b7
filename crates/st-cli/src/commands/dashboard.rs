//! Dashboard command: today's totals and per-subject goal progress.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use st_core::{DashboardStats, Subject, UserId, dashboard_stats};
use st_db::Database;

use super::util::{format_minutes, progress_bar};

/// Runs the dashboard command.
pub fn run(db: &Database, user: &UserId, json: bool) -> Result<()> {
    let now = Utc::now();
    let subjects = db
        .subjects_for_user(user)
        .context("failed to load subjects")?;
    let today = db
        .today_sessions(user, now)
        .context("failed to load today's sessions")?;
    let weekly = db
        .weekly_sessions(user, now)
        .context("failed to load the week's sessions")?;

    let stats = dashboard_stats(&subjects, &today, &weekly);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_dashboard(&stats, &subjects));
    }
    Ok(())
}

/// Formats the human-readable dashboard.
///
/// `subjects` must be the same list (same order) the stats were computed
/// from; per-subject rows are zipped by position.
fn render_dashboard(stats: &DashboardStats, subjects: &[Subject]) -> String {
    let mut output = String::new();

    writeln!(output, "STUDY DASHBOARD").unwrap();
    writeln!(output, "───────────────").unwrap();
    #[allow(clippy::cast_possible_truncation)]
    let today_minutes = (stats.today_hours * 60.0).round() as i64;
    #[allow(clippy::cast_possible_truncation)]
    let weekly_minutes = (stats.weekly_hours * 60.0).round() as i64;
    writeln!(output, "Today:       {}", format_minutes(today_minutes)).unwrap();
    writeln!(output, "This week:   {}", format_minutes(weekly_minutes)).unwrap();
    writeln!(
        output,
        "Daily goal:  {}% of combined goal",
        stats.daily_goal_percentage
    )
    .unwrap();

    if subjects.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No subjects yet.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'st subject add <name>' to create one.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    writeln!(output, "TODAY BY SUBJECT").unwrap();
    writeln!(output, "────────────────").unwrap();
    for (subject, progress) in subjects.iter().zip(&stats.subject_progress) {
        writeln!(
            output,
            "{} {:<20} {:>8}  {} {}%",
            subject.icon,
            subject.name,
            format_minutes(progress.today_minutes),
            progress_bar(progress.percentage, 100.0),
            progress.percentage
        )
        .unwrap();
    }

    output
}
