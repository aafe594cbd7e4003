//! Command-line parsing for the half-marathon estimator.
//!
//! The binary takes a single free-text description per run. Everything else
//! (API credentials, endpoints) comes from the environment or `.env`.

use std::path::PathBuf;

use clap::Parser;

pub mod prompt;

/// Model file used when neither `--model` nor `HM_MODEL_PATH` is given.
pub const DEFAULT_MODEL_PATH: &str = "model/halfmarathon_v1.json";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hm", version, about = "Half-marathon time estimator")]
pub struct Cli {
    /// Describe yourself: sex, age and your 5 km time (e.g. "I'm a 30 year old man and run 5 km in 22:30").
    ///
    /// If omitted, the description is read interactively.
    pub text: Vec<String>,

    /// Regression model file (JSON).
    #[arg(long, env = "HM_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Chat model used for extraction (defaults to `OPENAI_MODEL`, then gpt-4o).
    #[arg(long = "llm-model")]
    pub llm_model: Option<String>,

    /// Log pipeline stages (including what the extractor understood) to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The description passed on the command line, if any.
    pub fn description(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}
