//! The estimation pipeline shared by the binary and library callers.
//!
//! text -> extractor -> `RawExtraction` -> validator -> features -> predictor -> `HH:MM:SS`
//!
//! Each stage either hands a stronger type to the next one or stops the
//! request. In particular the predictor is never called unless validation
//! produced a `ValidatedRunner`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::domain::{EstimationResult, RawExtraction, ValidationBounds};
use crate::error::EstimateError;
use crate::extract::Extractor;
use crate::models::{Predictor, build_features};
use crate::report::{format_hms, format_runner};
use crate::validate::validate;

/// One extractor plus one predictor, applied to a request at a time.
pub struct EstimationPipeline<E, P> {
    extractor: E,
    predictor: P,
    bounds: ValidationBounds,
}

impl<E: Extractor, P: Predictor> EstimationPipeline<E, P> {
    pub fn new(extractor: E, predictor: P) -> Self {
        Self {
            extractor,
            predictor,
            bounds: ValidationBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: ValidationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Estimate a half-marathon time from a free-text self-description.
    ///
    /// Panics raised by the extractor or predictor are caught here and
    /// reported as `EstimateError::Pipeline`.
    pub fn estimate(&self, text: &str) -> Result<EstimationResult, EstimateError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(text))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let cause = panic_message(payload.as_ref());
                tracing::error!(%cause, "estimation pipeline panicked");
                Err(EstimateError::Pipeline { cause })
            }
        }
    }

    fn run(&self, text: &str) -> Result<EstimationResult, EstimateError> {
        // 1) Input.
        if text.trim().is_empty() {
            return Err(EstimateError::EmptyInput);
        }

        // 2) Extraction.
        let content = match self.extractor.extract(text) {
            Ok(Some(content)) if !content.trim().is_empty() => content,
            Ok(_) => {
                return Err(EstimateError::ExtractionFailed {
                    cause: "the extractor returned no content".to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "extraction failed");
                return Err(EstimateError::ExtractionFailed { cause: e.to_string() });
            }
        };

        // 3) Parse.
        let raw = RawExtraction::from_json_str(&content).map_err(|cause| {
            tracing::warn!(%cause, "extractor output is not a record");
            EstimateError::MalformedExtraction { cause }
        })?;
        tracing::info!(extraction = ?raw, "extractor returned record");

        // 4) Validate.
        let runner = validate(&raw, &self.bounds).map_err(EstimateError::Invalid)?;
        tracing::info!(runner = %format_runner(&runner), "record validated");

        // 5) Predict.
        let features = build_features(&runner);
        let predicted_seconds = self
            .predictor
            .predict(&features)
            .map_err(|e| EstimateError::Pipeline { cause: e.to_string() })?;

        // 6) Format.
        let formatted = format_hms(predicted_seconds).ok_or_else(|| EstimateError::Pipeline {
            cause: format!("predictor returned an unusable duration ({predicted_seconds})"),
        })?;
        tracing::info!(predicted_seconds, %formatted, "estimate ready");

        Ok(EstimationResult {
            predicted_seconds,
            formatted,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
