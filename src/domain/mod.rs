//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the untrusted extractor record (`RawExtraction`)
//! - the validated runner profile (`ValidatedRunner`) and its feature encoding
//! - validation bounds and the final `EstimationResult`

pub mod types;

pub use types::*;
