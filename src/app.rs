//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - loads the regression model (once per process)
//! - configures the extractor from the environment
//! - runs one estimation and prints the result

use clap::Parser;

use crate::cli::Cli;
use crate::cli::prompt::prompt_for_description;
use crate::domain::FeatureVector;
use crate::error::AppError;
use crate::extract::{OpenAiConfig, OpenAiExtractor};
use crate::models::{Predictor, shared_model};
use crate::report::format_estimate;

pub mod pipeline;

use pipeline::EstimationPipeline;

/// Entry point for the `hm` binary.
pub fn run() -> Result<(), AppError> {
    // Load `.env` before clap so env-backed flags see it.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let text = match cli.description() {
        Some(text) => text,
        None => prompt_for_description()?,
    };

    let model = shared_model(&cli.model)?;
    let extractor = OpenAiExtractor::new(OpenAiConfig::from_env(cli.llm_model.as_deref())?);
    let pipeline = EstimationPipeline::new(extractor, |f: &FeatureVector| model.predict(f));

    let result = pipeline.estimate(&text)?;
    println!("{}", format_estimate(&result));
    Ok(())
}
