//! Clock-string parsing for 5 km reference times.
//!
//! Accepted shapes are `MM:SS` and `HH:MM:SS`. Components are not range-checked
//! (`5:99` parses to 399 s); plausibility is the validator's concern.

use std::num::IntErrorKind;

use thiserror::Error;

/// The input was not a `MM:SS` / `HH:MM:SS` clock string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time format '{raw}' (expected MM:SS or HH:MM:SS)")]
pub struct InvalidTimeFormat {
    pub raw: String,
}

/// Parse a clock string into total seconds.
///
/// Integer components too large for the result saturate to `u64::MAX`, so an
/// absurdly long but well-formed time still reaches the range check.
pub fn parse_clock(raw: &str) -> Result<u64, InvalidTimeFormat> {
    let fail = || InvalidTimeFormat { raw: raw.to_string() };

    let parts = raw
        .split(':')
        .map(|part| parse_component(part.trim()))
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(fail)?;

    match parts.as_slice() {
        [m, s] => Ok(m.saturating_mul(60).saturating_add(*s)),
        [h, m, s] => Ok(h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s)),
        _ => Err(fail()),
    }
}

fn parse_component(part: &str) -> Option<u64> {
    match part.parse::<u64>() {
        Ok(v) => Some(v),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

/// Render seconds as `MM:SS`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
