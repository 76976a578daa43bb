//! Numeric normalization of raw cell text.
//!
//! Source pages render numbers as text: `"1,234.5"`, `"30.10%"`, or a
//! placeholder such as `"-"` when there is no value. These functions map that
//! text to `Option<f64>`, keeping "no value" distinct from both zero and a
//! parse failure.

use crate::error::{Result, ScrapeError};

/// Placeholder strings that mean "no value".
pub const SENTINELS: [&str; 3] = ["-", "NA", "--"];

/// Thousands-group separator stripped before parsing.
const GROUP_SEPARATOR: char = ',';

/// Parse trimmed cell text as a number.
///
/// Sentinels yield `Ok(None)`. Anything else has its thousands separators
/// removed and must parse as a float.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedNumber`] if the text is neither a sentinel
/// nor a finite float.
pub fn normalize_number(raw: &str) -> Result<Option<f64>> {
    if SENTINELS.contains(&raw) {
        return Ok(None);
    }

    let digits: String = raw.chars().filter(|&c| c != GROUP_SEPARATOR).collect();
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ScrapeError::MalformedNumber(raw.to_string())),
    }
}

/// Parse trimmed cell text as a percentage, e.g. `"30.10%"` -> `30.10`.
///
/// The value is not divided by 100.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedNumber`] under the same conditions as
/// [`normalize_number`].
pub fn normalize_percent(raw: &str) -> Result<Option<f64>> {
    normalize_number(raw.strip_suffix('%').unwrap_or(raw))
}
