//! Interactive prompt used when no description is given on the command line.

use std::io::{self, BufRead, Write};

use crate::error::AppError;

const PROMPT: &str = "Tell me about your running (e.g. \"I'm a 30 year old man and run 5 km in 22:30\"): ";

/// Ask for a description on stdin.
pub fn prompt_for_description() -> Result<String, AppError> {
    print!("{PROMPT}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    read_description(io::stdin().lock())
}

/// Read one line; EOF before any input is an error.
fn read_description(mut reader: impl BufRead) -> Result<String, AppError> {
    let mut input = String::new();
    let bytes = reader
        .read_line(&mut input)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Pass a description as arguments: `hm \"I'm 30 and run 5 km in 22:30\"`.",
        ));
    }

    Ok(input.trim().to_string())
}
