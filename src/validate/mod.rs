//! Field validation for extractor output.
//!
//! Every field is checked independently and all problems are collected into a
//! single `ValidationReport`, so a user can fix everything in one pass. A
//! `ValidatedRunner` is only produced when the report is empty.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{RawExtraction, Sex, ValidatedRunner, ValidationBounds};

pub mod time;

pub use time::{InvalidTimeFormat, format_clock, parse_clock};

/// A single problem with one extracted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Unrecognized sex ('{raw}'); expected M or K.")]
    UnrecognizedSex { raw: String },

    #[error("Age must be a whole number (got '{raw}').")]
    InvalidAge { raw: String },

    /// `raw` is the value as the extractor sent it; `age` is its integer reading.
    #[error("Age {raw} is outside the supported range {min}-{max}.")]
    AgeOutOfRange { raw: String, age: i64, min: u32, max: u32 },

    #[error("Invalid time format ('{raw}'). Use MM:SS.")]
    InvalidTimeFormat { raw: String },

    #[error("5 km time ({raw}) is unrealistic (under {limit}).", limit = format_clock(*.min_s))]
    TimeTooFast { raw: String, min_s: u32 },

    #[error("5 km time ({raw}) is too slow (over {limit}). This tool is for runners!", limit = format_clock(*.max_s))]
    TimeTooSlow { raw: String, max_s: u32 },
}

/// Ordered list of every violation found in one record (sex, age, time).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// One human-readable message per violation.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, v) in self.violations.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Validate an extracted record against the given bounds.
pub fn validate(raw: &RawExtraction, bounds: &ValidationBounds) -> Result<ValidatedRunner, ValidationReport> {
    let mut report = ValidationReport::default();

    let sex = check_sex(raw.sex.as_ref()).map_err(|v| report.violations.push(v)).ok();
    let age = check_age(raw.age.as_ref(), bounds).map_err(|v| report.violations.push(v)).ok();
    let time = check_reference_time(raw.reference_time.as_ref(), bounds)
        .map_err(|v| report.violations.push(v))
        .ok();

    match (sex, age, time) {
        (Some(sex), Some(age), Some(time)) if report.is_empty() => Ok(ValidatedRunner::new(sex, age, time)),
        _ => {
            tracing::warn!(violations = report.len(), "extracted record failed validation");
            Err(report)
        }
    }
}

fn check_sex(value: Option<&Value>) -> Result<Sex, Violation> {
    let normalized = display_raw(value).to_uppercase();
    Sex::from_token(&normalized).ok_or(Violation::UnrecognizedSex { raw: normalized })
}

fn check_age(value: Option<&Value>, bounds: &ValidationBounds) -> Result<u32, Violation> {
    let age = value.and_then(coerce_integer).ok_or_else(|| Violation::InvalidAge {
        raw: display_raw(value),
    })?;

    let out_of_range = || Violation::AgeOutOfRange {
        raw: display_raw(value),
        age,
        min: bounds.age_min,
        max: bounds.age_max,
    };

    if age < i64::from(bounds.age_min) || age > i64::from(bounds.age_max) {
        return Err(out_of_range());
    }
    u32::try_from(age).map_err(|_| out_of_range())
}

fn check_reference_time(value: Option<&Value>, bounds: &ValidationBounds) -> Result<u32, Violation> {
    let raw = display_raw(value);
    let seconds = parse_clock(&raw).map_err(|e| Violation::InvalidTimeFormat { raw: e.raw })?;

    if seconds < u64::from(bounds.time_min_s) {
        return Err(Violation::TimeTooFast {
            raw,
            min_s: bounds.time_min_s,
        });
    }
    if seconds > u64::from(bounds.time_max_s) {
        return Err(Violation::TimeTooSlow {
            raw,
            max_s: bounds.time_max_s,
        });
    }
    u32::try_from(seconds).map_err(|_| Violation::TimeTooSlow {
        raw,
        max_s: bounds.time_max_s,
    })
}

/// Integer conversion for loosely-typed extractor values.
///
/// Integers pass through, finite floats truncate toward zero, and strings must
/// hold an integer literal. Anything else has no integer reading.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        // `as` saturates, so huge values still land outside the age range.
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Text form of a raw field for messages and string-based checks.
fn display_raw(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sex: Value, age: Value, time: Value) -> RawExtraction {
        RawExtraction {
            sex: Some(sex),
            age: Some(age),
            reference_time: Some(time),
        }
    }

    fn check(sex: &str, age: i64, time: &str) -> Result<ValidatedRunner, ValidationReport> {
        validate(
            &record(Value::from(sex), Value::from(age), Value::from(time)),
            &ValidationBounds::default(),
        )
    }

    #[test]
    fn accepts_typical_runner() {
        let runner = check("m", 30, "22:30").unwrap();
        assert_eq!(runner.sex(), Sex::Male);
        assert_eq!(runner.age(), 30);
        assert_eq!(runner.reference_time_seconds(), 1350);

        let runner = check("K", 42, "0:27:15").unwrap();
        assert_eq!(runner.sex(), Sex::Female);
        assert_eq!(runner.reference_time_seconds(), 1635);
    }

    #[test]
    fn age_boundaries_are_inclusive() {
        assert!(matches!(
            check("M", 14, "25:00").unwrap_err().violations.as_slice(),
            [Violation::AgeOutOfRange { age: 14, .. }]
        ));
        assert!(check("M", 15, "25:00").is_ok());
        assert!(check("M", 100, "25:00").is_ok());
        assert!(matches!(
            check("M", 101, "25:00").unwrap_err().violations.as_slice(),
            [Violation::AgeOutOfRange { age: 101, .. }]
        ));
    }

    #[test]
    fn time_boundaries_are_inclusive() {
        assert!(matches!(
            check("K", 30, "11:59").unwrap_err().violations.as_slice(),
            [Violation::TimeTooFast { .. }]
        ));
        assert!(check("K", 30, "12:00").is_ok());
        assert!(check("K", 30, "60:00").is_ok());
        assert!(check("K", 30, "1:00:00").is_ok());
        assert!(matches!(
            check("K", 30, "60:01").unwrap_err().violations.as_slice(),
            [Violation::TimeTooSlow { .. }]
        ));
    }

    #[test]
    fn reports_every_failing_field() {
        let raw = record(Value::from("X"), Value::from("old"), Value::from("5:99"));
        let report = validate(&raw, &ValidationBounds::default()).unwrap_err();
        assert_eq!(report.len(), 3);
        assert!(matches!(report.violations[0], Violation::UnrecognizedSex { ref raw } if raw == "X"));
        assert!(matches!(report.violations[1], Violation::InvalidAge { ref raw } if raw == "old"));
        assert!(matches!(report.violations[2], Violation::TimeTooFast { ref raw, .. } if raw == "5:99"));
    }

    #[test]
    fn missing_fields_are_violations() {
        let report = validate(&RawExtraction::default(), &ValidationBounds::default()).unwrap_err();
        assert!(matches!(
            report.violations.as_slice(),
            [
                Violation::UnrecognizedSex { .. },
                Violation::InvalidAge { .. },
                Violation::InvalidTimeFormat { .. },
            ]
        ));
    }

    #[test]
    fn age_conversion_follows_integer_semantics() {
        let bounds = ValidationBounds::default();
        let with_age = |age: Value| validate(&record(Value::from("M"), age, Value::from("25:00")), &bounds);

        assert_eq!(with_age(Value::from("30")).unwrap().age(), 30);
        assert_eq!(with_age(Value::from(" 30 ")).unwrap().age(), 30);
        assert_eq!(with_age(Value::from(30.9)).unwrap().age(), 30);
        assert!(matches!(
            with_age(Value::from("30.5")).unwrap_err().violations.as_slice(),
            [Violation::InvalidAge { .. }]
        ));
        assert!(matches!(
            with_age(Value::Bool(true)).unwrap_err().violations.as_slice(),
            [Violation::InvalidAge { .. }]
        ));
        assert!(matches!(
            with_age(Value::from(-3)).unwrap_err().violations.as_slice(),
            [Violation::AgeOutOfRange { age: -3, .. }]
        ));
    }

    #[test]
    fn non_string_time_is_a_format_violation() {
        let raw = record(Value::from("M"), Value::from(30), Value::from(22.5));
        let report = validate(&raw, &ValidationBounds::default()).unwrap_err();
        assert!(matches!(
            report.violations.as_slice(),
            [Violation::InvalidTimeFormat { raw }] if raw == "22.5"
        ));
    }

    #[test]
    fn valid_space_round_trips() {
        let bounds = ValidationBounds::default();
        for sex in ["M", "K"] {
            for age in bounds.age_min..=bounds.age_max {
                for seconds in (bounds.time_min_s..=bounds.time_max_s).step_by(37).chain([bounds.time_max_s]) {
                    let runner = check(sex, i64::from(age), &format_clock(seconds)).unwrap();
                    assert_eq!(runner.sex().token(), sex);
                    assert_eq!(runner.age(), age);
                    assert_eq!(runner.reference_time_seconds(), seconds);
                }
            }
            for seconds in bounds.time_min_s..=bounds.time_max_s {
                let runner = check(sex, 30, &format_clock(seconds)).unwrap();
                assert_eq!(runner.reference_time_seconds(), seconds);

                let again = validate(&runner.to_raw(), &bounds).unwrap();
                assert_eq!(again, runner);
            }
        }
    }

    #[test]
    fn huge_but_well_formed_time_is_too_slow() {
        let raw = record(Value::from("M"), Value::from(30), Value::from("99999999999:00"));
        let report = validate(&raw, &ValidationBounds::default()).unwrap_err();
        assert!(matches!(
            report.violations.as_slice(),
            [Violation::TimeTooSlow { raw, .. }] if raw == "99999999999:00"
        ));
    }

    #[test]
    fn saturated_age_is_reported_as_sent() {
        let bounds = ValidationBounds::default();
        let raw = record(Value::from("M"), Value::from(u64::MAX), Value::from("25:00"));
        let report = validate(&raw, &bounds).unwrap_err();
        assert!(matches!(
            report.violations.as_slice(),
            [Violation::AgeOutOfRange { raw, .. }] if raw == "18446744073709551615"
        ));

        let raw = record(Value::from("M"), Value::from(1e30), Value::from("25:00"));
        let text = validate(&raw, &bounds).unwrap_err().to_string();
        assert!(text.starts_with("Age 1"), "{text}");
        assert!(!text.contains(&i64::MAX.to_string()), "{text}");
    }

    #[test]
    fn custom_bounds_are_honoured() {
        let bounds = ValidationBounds {
            age_min: 18,
            ..ValidationBounds::default()
        };
        let raw = record(Value::from("M"), Value::from(17), Value::from("25:00"));
        let report = validate(&raw, &bounds).unwrap_err();
        assert_eq!(report.messages(), vec!["Age 17 is outside the supported range 18-100."]);
    }

    #[test]
    fn messages_name_the_offending_values() {
        let raw = record(Value::from("x"), Value::from(30), Value::from("75:00"));
        let report = validate(&raw, &ValidationBounds::default()).unwrap_err();
        let text = report.to_string();
        assert!(text.contains("'X'"), "{text}");
        assert!(text.contains("75:00") && text.contains("60:00"), "{text}");
    }
}
