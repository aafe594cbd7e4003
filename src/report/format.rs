//! Terminal formatting for estimates and error lists.
//!
//! Kept apart from the pipeline so the wording can change without touching
//! validation or prediction code.

use chrono::{NaiveTime, Timelike};

use crate::domain::{EstimationResult, ValidatedRunner};

const SECONDS_PER_DAY: u64 = 86_400;

/// Render a duration in seconds as `HH:MM:SS`.
///
/// Fractional seconds are truncated and the hour field wraps at 24, the same
/// way a clock would show the duration as a time of day. Returns `None` for
/// negative or non-finite input.
pub fn format_hms(seconds: f64) -> Option<String> {
    if !(seconds.is_finite() && seconds >= 0.0) {
        return None;
    }
    let whole = (seconds.trunc() as u64) % SECONDS_PER_DAY;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(whole).ok()?, 0)?;
    Some(format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second()))
}

/// Success line printed by the binary.
pub fn format_estimate(result: &EstimationResult) -> String {
    format!("Your estimated half-marathon time: {}", result.formatted)
}

/// Short summary of what the extractor understood, for verbose output.
pub fn format_runner(runner: &ValidatedRunner) -> String {
    format!(
        "sex={} age={} 5km={}",
        runner.sex().token(),
        runner.age(),
        crate::validate::format_clock(runner.reference_time_seconds())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(5400.0).as_deref(), Some("01:30:00"));
        assert_eq!(format_hms(6165.9).as_deref(), Some("01:42:45"));
        assert_eq!(format_hms(0.0).as_deref(), Some("00:00:00"));
    }

    #[test]
    fn wraps_past_a_day() {
        assert_eq!(format_hms(86_400.0 + 61.0).as_deref(), Some("00:01:01"));
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert_eq!(format_hms(-1.0), None);
        assert_eq!(format_hms(f64::NAN), None);
        assert_eq!(format_hms(f64::INFINITY), None);
    }

    #[test]
    fn estimate_line_contains_formatted_time() {
        let result = EstimationResult {
            predicted_seconds: 5400.0,
            formatted: "01:30:00".to_string(),
        };
        assert!(format_estimate(&result).ends_with("01:30:00"));
    }
}
