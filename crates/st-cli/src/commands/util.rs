//! Shared output formatting helpers.

/// Formats minutes as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
/// Negative durations are treated as 0m.
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// Generates a 10-character progress bar.
/// Values below 5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 {
        1
    } else {
        // Clamp to 10 in case value > max
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_minutes_hours_and_minutes() {
        assert_eq!(format_minutes(150), "2h 30m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(90), "1h 30m");
    }

    #[test]
    fn format_minutes_minutes_only() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(1), "1m");
        assert_eq!(format_minutes(0), "0m");
    }

    #[test]
    fn format_minutes_negative_is_zero() {
        assert_eq!(format_minutes(-1), "0m");
        assert_eq!(format_minutes(-90), "0m");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(progress_bar(100.0, 100.0), "██████████");
    }

    #[test]
    fn progress_bar_partial() {
        assert_eq!(progress_bar(50.0, 100.0), "█████░░░░░");
        assert_eq!(progress_bar(80.0, 100.0), "████████░░");
        assert_eq!(progress_bar(20.0, 100.0), "██░░░░░░░░");
    }

    #[test]
    fn progress_bar_minimum_block() {
        assert_eq!(progress_bar(4.0, 100.0), "█░░░░░░░░░");
        assert_eq!(progress_bar(1.0, 100.0), "█░░░░░░░░░");
    }

    #[test]
    fn progress_bar_empty_and_degenerate() {
        assert_eq!(progress_bar(0.0, 100.0), "░░░░░░░░░░");
        assert_eq!(progress_bar(0.0, 0.0), "░░░░░░░░░░");
        assert_eq!(progress_bar(5.0, 0.0), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_clamps_overflow() {
        assert_eq!(progress_bar(250.0, 100.0), "██████████");
    }
}
