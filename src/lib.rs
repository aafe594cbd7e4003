//! `hm-estimator` library crate.
//!
//! Estimates a half-marathon finish time from a free-text self-description.
//! The binary (`hm`) is a thin wrapper around this library so that:
//!
//! - the validation pipeline is testable without network access or a model file
//! - the extractor and predictor can be swapped (any closure works)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod logging;
pub mod models;
pub mod report;
pub mod validate;

pub use app::pipeline::EstimationPipeline;
pub use error::{AppError, EstimateError};
