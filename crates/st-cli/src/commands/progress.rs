//! Progress command: streak plus the trailing week broken down by subject.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use st_core::{ChartSeries, UserId, build_chart_series, calculate_streak};
use st_db::Database;

use super::util::progress_bar;

/// JSON shape for the progress view.
#[derive(Debug, Serialize)]
pub struct ProgressReport {
    /// Consecutive days with study activity, counted back from today.
    pub streak_days: u32,
    /// Per-subject hours over the trailing week, chart-ready.
    pub chart: ChartSeries,
}

/// Runs the progress command.
pub fn run(db: &Database, user: &UserId, json: bool) -> Result<()> {
    let now = Utc::now();
    let subjects = db
        .subjects_for_user(user)
        .context("failed to load subjects")?;
    let weekly = db
        .weekly_sessions(user, now)
        .context("failed to load the week's sessions")?;

    let streak_days = calculate_streak(db, user, now).context("failed to compute streak")?;
    let chart = build_chart_series(&subjects, &weekly);
    let report = ProgressReport { streak_days, chart };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_progress(&report));
    }
    Ok(())
}

/// Formats the human-readable progress view.
fn render_progress(report: &ProgressReport) -> String {
    let mut output = String::new();

    writeln!(output, "STUDY PROGRESS").unwrap();
    writeln!(output, "──────────────").unwrap();
    let day_word = if report.streak_days == 1 { "day" } else { "days" };
    writeln!(output, "Streak: {} {day_word}", report.streak_days).unwrap();

    if report.chart.names.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No subjects yet.").unwrap();
        return output;
    }

    let max_hours = report.chart.hours.iter().copied().fold(0.0, f64::max);

    writeln!(output).unwrap();
    writeln!(output, "LAST 7 DAYS BY SUBJECT").unwrap();
    writeln!(output, "──────────────────────").unwrap();
    for (name, &hours) in report.chart.names.iter().zip(&report.chart.hours) {
        writeln!(
            output,
            "{name:<20} {hours:>6.1}h  {}",
            progress_bar(hours, max_hours)
        )
        .unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_subjects() {
        let report = ProgressReport {
            streak_days: 0,
            chart: ChartSeries::default(),
        };
        let output = render_progress(&report);
        assert!(output.contains("Streak: 0 days"));
        assert!(output.contains("No subjects yet."));
    }

    #[test]
    fn render_uses_singular_for_one_day() {
        let report = ProgressReport {
            streak_days: 1,
            chart: ChartSeries::default(),
        };
        assert!(render_progress(&report).contains("Streak: 1 day\n"));
    }

    #[test]
    fn render_scales_bars_to_largest_subject() {
        let report = ProgressReport {
            streak_days: 3,
            chart: ChartSeries {
                names: vec!["Math".to_string(), "History".to_string()],
                hours: vec![2.0, 1.0],
                colors: vec!["#6366F1".to_string(), "#EF4444".to_string()],
            },
        };
        let output = render_progress(&report);
        assert!(output.contains("Streak: 3 days"));
        assert!(output.contains("Math"));
        assert!(output.contains("██████████"));
        assert!(output.contains("█████░░░░░"));
    }

    #[test]
    fn report_serializes_with_parallel_arrays() {
        let report = ProgressReport {
            streak_days: 2,
            chart: ChartSeries {
                names: vec!["Math".to_string()],
                hours: vec![0.5],
                colors: vec!["#6366F1".to_string()],
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["streak_days"], 2);
        assert_eq!(json["chart"]["names"][0], "Math");
        assert_eq!(json["chart"]["hours"][0], 0.5);
    }
}
