//! Linear regression model exported from training.
//!
//! The model file is a small JSON document:
//!
//! ```text
//! {
//!   "name": "halfmarathon_v1",
//!   "feature_names": ["plec", "wiek", "5km_s"],
//!   "intercept": 312.4,
//!   "coefficients": [-118.7, 9.6, 4.21]
//! }
//! ```
//!
//! `feature_names` must match the pipeline's feature order exactly. A file
//! trained on a different column order would otherwise load fine and produce
//! silently wrong predictions.

use std::fs::File;
use std::path::Path;

use nalgebra::DVector;
use serde::Deserialize;

use crate::domain::{FEATURE_NAMES, FeatureVector};
use crate::error::AppError;
use crate::models::{PredictError, Predictor};

/// Fitted linear model: `y = intercept + Σ coefficient_i * feature_i`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Read and check a model JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open model file '{}': {e}", path.display())))?;
        let model: LinearModel = serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid model file '{}': {e}", path.display())))?;
        model.check_schema()?;
        Ok(model)
    }

    /// Parse and check a model from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, AppError> {
        let model: LinearModel =
            serde_json::from_str(text).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
        model.check_schema()?;
        Ok(model)
    }

    fn check_schema(&self) -> Result<(), AppError> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(AppError::new(
                2,
                format!(
                    "Model '{}' expects features {:?}, but the pipeline produces {:?}.",
                    self.name, self.feature_names, FEATURE_NAMES
                ),
            ));
        }
        if self.coefficients.len() != FEATURE_NAMES.len() {
            return Err(AppError::new(
                2,
                format!(
                    "Model '{}' has {} coefficients for {} features.",
                    self.name,
                    self.coefficients.len(),
                    FEATURE_NAMES.len()
                ),
            ));
        }
        if !(self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())) {
            return Err(AppError::new(2, format!("Model '{}' has non-finite parameters.", self.name)));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let x = DVector::from_row_slice(&features.to_array());
        let w = DVector::from_row_slice(&self.coefficients);
        if x.len() != w.len() {
            return Err(PredictError(format!(
                "feature/coefficient length mismatch ({} vs {})",
                x.len(),
                w.len()
            )));
        }
        Ok(self.intercept + w.dot(&x))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const MODEL_JSON: &str = r#"{
        "name": "test",
        "feature_names": ["plec", "wiek", "5km_s"],
        "intercept": 100.0,
        "coefficients": [-60.0, 2.0, 4.0]
    }"#;

    #[test]
    fn predicts_intercept_plus_weighted_features() {
        let model = LinearModel::from_json_str(MODEL_JSON).unwrap();
        let f = FeatureVector {
            sex: 1,
            age: 30,
            reference_time_seconds: 1350,
        };
        // 100 - 60 + 60 + 5400
        let y = model.predict(&f).unwrap();
        assert!((y - 5500.0).abs() < 1e-9, "got {y}");
    }

    #[test]
    fn rejects_mismatched_feature_order() {
        let json = MODEL_JSON.replace(r#"["plec", "wiek", "5km_s"]"#, r#"["wiek", "plec", "5km_s"]"#);
        let err = LinearModel::from_json_str(&json).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("expects features"));
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let json = MODEL_JSON.replace("[-60.0, 2.0, 4.0]", "[-60.0, 2.0]");
        let err = LinearModel::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("2 coefficients"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MODEL_JSON.as_bytes()).unwrap();

        let model = LinearModel::load(file.path()).unwrap();
        assert_eq!(model.name, "test");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinearModel::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bundled_model_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/halfmarathon_v1.json");
        let model = LinearModel::load(&path).unwrap();
        let f = FeatureVector {
            sex: 1,
            age: 30,
            reference_time_seconds: 1350,
        };
        let y = model.predict(&f).unwrap();
        // Somewhere between 1:20 and 2:10 for a 22:30 5 km runner.
        assert!((4800.0..7800.0).contains(&y), "got {y}");
    }
}
