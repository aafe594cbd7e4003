//! Shared domain types.
//!
//! The types split along the trust boundary of the pipeline:
//!
//! - `RawExtraction` is whatever the extractor produced and carries no guarantees
//! - `ValidatedRunner` can only be built by the validator, so holding one means
//!   every field passed its checks
//! - `FeatureVector` is the exact encoding the regression model was trained on

use serde::Deserialize;
use serde_json::Value;

/// Youngest supported runner age (inclusive).
pub const AGE_MIN: u32 = 15;
/// Oldest supported runner age (inclusive).
pub const AGE_MAX: u32 = 100;
/// Fastest accepted 5 km reference time in seconds (12:00).
pub const REFERENCE_TIME_MIN_S: u32 = 720;
/// Slowest accepted 5 km reference time in seconds (60:00).
pub const REFERENCE_TIME_MAX_S: u32 = 3600;

/// Column names of the model's training schema, in feature order.
pub const FEATURE_NAMES: [&str; 3] = ["plec", "wiek", "5km_s"];

/// Runner sex as understood by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse an already-normalized token (`M` or `K`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "M" => Some(Sex::Male),
            "K" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Token used by the extractor and the training data.
    pub fn token(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "K",
        }
    }

    /// Encoding used in the feature vector.
    pub fn encoded(self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 0,
        }
    }
}

/// Record returned by the extractor, before any validation.
///
/// Every field is optional and untyped. The extractor was historically prompted
/// with the training-schema keys, so those are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawExtraction {
    #[serde(default, alias = "plec")]
    pub sex: Option<Value>,
    #[serde(default, alias = "wiek")]
    pub age: Option<Value>,
    #[serde(default, alias = "czas_5km")]
    pub reference_time: Option<Value>,
}

impl RawExtraction {
    /// Parse extractor output text into a record.
    ///
    /// Only a JSON object is accepted; arrays and scalars are rejected even though
    /// serde could map an array onto the struct positionally.
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(text).map_err(|e| format!("not valid JSON: {e}"))?;
        if !value.is_object() {
            return Err(format!("expected a JSON object, got `{}`", json_kind(&value)));
        }
        serde_json::from_value(value).map_err(|e| format!("unexpected record shape: {e}"))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A runner profile whose fields all passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRunner {
    sex: Sex,
    age: u32,
    reference_time_seconds: u32,
}

impl ValidatedRunner {
    /// Only the validator may construct a runner.
    pub(crate) fn new(sex: Sex, age: u32, reference_time_seconds: u32) -> Self {
        Self {
            sex,
            age,
            reference_time_seconds,
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn reference_time_seconds(&self) -> u32 {
        self.reference_time_seconds
    }

    /// Render the runner back into the extractor's record shape.
    pub fn to_raw(&self) -> RawExtraction {
        RawExtraction {
            sex: Some(Value::String(self.sex.token().to_string())),
            age: Some(Value::from(self.age)),
            reference_time: Some(Value::String(crate::validate::format_clock(
                self.reference_time_seconds,
            ))),
        }
    }
}

/// Numeric model input: `(plec, wiek, 5km_s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub sex: u8,
    pub age: u32,
    pub reference_time_seconds: u32,
}

impl FeatureVector {
    /// Features in training-schema order (see `FEATURE_NAMES`).
    pub fn to_array(&self) -> [f64; 3] {
        [
            f64::from(self.sex),
            f64::from(self.age),
            f64::from(self.reference_time_seconds),
        ]
    }
}

/// Plausibility bounds applied by the validator (all inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationBounds {
    pub age_min: u32,
    pub age_max: u32,
    pub time_min_s: u32,
    pub time_max_s: u32,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        Self {
            age_min: AGE_MIN,
            age_max: AGE_MAX,
            time_min_s: REFERENCE_TIME_MIN_S,
            time_max_s: REFERENCE_TIME_MAX_S,
        }
    }
}

/// Predicted half-marathon time for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub predicted_seconds: f64,
    /// `HH:MM:SS` rendering of `predicted_seconds`.
    pub formatted: String,
}
