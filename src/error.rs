use thiserror::Error;

use crate::validate::ValidationReport;

/// Why a single estimation request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Please describe yourself first (the input was empty).")]
    EmptyInput,

    #[error("Extraction failed: {cause}")]
    ExtractionFailed { cause: String },

    #[error("The extractor returned malformed data: {cause}")]
    MalformedExtraction { cause: String },

    #[error("{0}")]
    Invalid(ValidationReport),

    #[error("Unexpected pipeline error: {cause}")]
    Pipeline { cause: String },
}

impl EstimateError {
    /// User-facing messages; a validation report yields one line per violation.
    pub fn messages(&self) -> Vec<String> {
        match self {
            EstimateError::Invalid(report) => report.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Process-level error: a message plus the exit code the binary reports.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        let exit_code = match &err {
            EstimateError::EmptyInput => 2,
            EstimateError::Invalid(_) => 3,
            EstimateError::ExtractionFailed { .. }
            | EstimateError::MalformedExtraction { .. }
            | EstimateError::Pipeline { .. } => 4,
        };
        let message = err
            .messages()
            .iter()
            .map(|m| format!("error: {m}"))
            .collect::<Vec<_>>()
            .join("\n");
        AppError::new(exit_code, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;

    #[test]
    fn validation_report_maps_to_one_line_per_violation() {
        let report = ValidationReport {
            violations: vec![
                Violation::UnrecognizedSex { raw: "X".to_string() },
                Violation::InvalidAge { raw: "old".to_string() },
            ],
        };
        let err = AppError::from(EstimateError::Invalid(report));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string().lines().count(), 2);
        assert!(err.to_string().lines().all(|l| l.starts_with("error: ")));
    }

    #[test]
    fn external_failures_use_exit_code_four() {
        let err = AppError::from(EstimateError::ExtractionFailed {
            cause: "timeout".to_string(),
        });
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("timeout"));
        assert_eq!(AppError::from(EstimateError::EmptyInput).exit_code(), 2);
    }
}
