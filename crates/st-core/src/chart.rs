//! Chart-ready series of per-subject study time.

use std::collections::HashMap;

use serde::Serialize;

use crate::session::StudySession;
use crate::subject::Subject;

/// Three parallel arrays, index-aligned with the input subject list.
///
/// The shape feeds a doughnut chart directly: labels, values, segment
/// colors. Order follows the subject list, never the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub names: Vec<String>,
    /// Total study time per subject, in fractional hours.
    pub hours: Vec<f64>,
    pub colors: Vec<String>,
}

/// Sums session time into hours per subject, in subject-list order.
///
/// Subjects with no matching sessions contribute 0. Sessions whose
/// `subject_id` matches none of the supplied subjects are skipped; that is
/// how orphans left behind by a subject deletion fall out of the chart.
#[allow(clippy::cast_precision_loss)]
pub fn build_chart_series(subjects: &[Subject], sessions: &[StudySession]) -> ChartSeries {
    let index: HashMap<_, _> = subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| (&subject.id, i))
        .collect();

    let mut hours = vec![0.0; subjects.len()];
    for session in sessions {
        if let Some(&i) = index.get(&session.subject_id) {
            hours[i] += session.duration_minutes as f64 / 60.0;
        }
    }

    ChartSeries {
        names: subjects.iter().map(|s| s.name.clone()).collect(),
        hours,
        colors: subjects.iter().map(|s| s.color.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::{SessionId, SubjectId, UserId};

    fn subject(id: &str, name: &str, color: &str) -> Subject {
        Subject {
            id: SubjectId::new(id).unwrap(),
            owner: UserId::new("alice").unwrap(),
            name: name.to_string(),
            color: color.to_string(),
            icon: "📚".to_string(),
            weekly_goal_hours: Some(5.0),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn session(subject_id: &str, minutes: i64) -> StudySession {
        let start = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        StudySession {
            id: SessionId::new(format!("sess-{subject_id}-{minutes}")).unwrap(),
            owner: UserId::new("alice").unwrap(),
            subject_id: SubjectId::new(subject_id).unwrap(),
            start_time: start,
            duration_minutes: minutes,
            session_date: Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap(),
            created_at: start,
        }
    }

    // Subject order is preserved; untouched subjects stay at 0.
    #[test]
    fn series_is_index_aligned_with_subjects() {
        let subjects = vec![
            subject("a", "Algebra", "#6366F1"),
            subject("b", "Biology", "#10B981"),
            subject("c", "Chemistry", "#EF4444"),
        ];
        let sessions = vec![session("b", 90)];

        let series = build_chart_series(&subjects, &sessions);
        assert_eq!(series.names, vec!["Algebra", "Biology", "Chemistry"]);
        assert_eq!(series.hours, vec![0.0, 1.5, 0.0]);
        assert_eq!(series.colors, vec!["#6366F1", "#10B981", "#EF4444"]);
    }

    #[test]
    fn series_accumulates_multiple_sessions() {
        let subjects = vec![subject("a", "Algebra", "#6366F1")];
        let sessions = vec![session("a", 30), session("a", 45), session("a", 15)];

        let series = build_chart_series(&subjects, &sessions);
        assert_eq!(series.hours, vec![1.5]);
    }

    #[test]
    fn orphan_sessions_are_skipped() {
        let subjects = vec![subject("a", "Algebra", "#6366F1")];
        let sessions = vec![session("a", 60), session("deleted", 600)];

        let series = build_chart_series(&subjects, &sessions);
        assert_eq!(series.hours, vec![1.0]);
    }

    #[test]
    fn empty_inputs_yield_empty_series() {
        let series = build_chart_series(&[], &[]);
        assert_eq!(series, ChartSeries::default());
    }

    #[test]
    fn series_serializes_as_parallel_arrays() {
        let subjects = vec![subject("a", "Algebra", "#6366F1")];
        let series = build_chart_series(&subjects, &[session("a", 30)]);

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["names"][0], "Algebra");
        assert_eq!(json["hours"][0], 0.5);
        assert_eq!(json["colors"][0], "#6366F1");
    }
}
