//! Text extraction: free-text self-description -> JSON record.
//!
//! The pipeline treats extraction as an opaque call. `OpenAiExtractor` is the
//! production backend; any closure with the right signature also works.

use thiserror::Error;

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiExtractor};

/// Extraction backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Turns user text into the extractor's raw JSON text.
///
/// `Ok(None)` means the backend answered but produced no content.
pub trait Extractor {
    fn extract(&self, text: &str) -> Result<Option<String>, ExtractError>;
}

impl<F> Extractor for F
where
    F: Fn(&str) -> Result<Option<String>, ExtractError>,
{
    fn extract(&self, text: &str) -> Result<Option<String>, ExtractError> {
        self(text)
    }
}
