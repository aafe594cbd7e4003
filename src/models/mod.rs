//! Predictive model: feature encoding and the regression behind it.
//!
//! The pipeline only sees the `Predictor` trait. `LinearModel` is the concrete
//! regression shipped with the binary; tests plug in closures instead.

use std::path::Path;
use std::sync::OnceLock;

use thiserror::Error;

use crate::domain::FeatureVector;
use crate::error::AppError;

pub mod features;
pub mod linear;

pub use features::build_features;
pub use linear::LinearModel;

/// The predictor could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("prediction failed: {0}")]
pub struct PredictError(pub String);

/// Maps a feature vector to a predicted half-marathon time in seconds.
pub trait Predictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureVector) -> Result<f64, PredictError>,
{
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        self(features)
    }
}

static SHARED_MODEL: OnceLock<LinearModel> = OnceLock::new();

/// Load the process-wide model on first use and return it thereafter.
///
/// Once a model is loaded, later calls return it regardless of `path` and never
/// touch the disk. The first load is not serialized: threads racing on first use
/// may each read the file, and only one copy is kept.
pub fn shared_model(path: &Path) -> Result<&'static LinearModel, AppError> {
    if let Some(model) = SHARED_MODEL.get() {
        return Ok(model);
    }

    let model = LinearModel::load(path)?;
    tracing::info!(model = %model.name, path = %path.display(), "loaded regression model");

    Ok(SHARED_MODEL.get_or_init(|| model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_model_loads_once() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/halfmarathon_v1.json");
        let first = shared_model(&bundled).unwrap();
        let second = shared_model(Path::new("/nonexistent/model.json")).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
