//! Conventional census file names.

use std::fmt::Display;

use crate::error::FarsError;

/// Coerces a year given as a number or string into an integer.
///
/// Whole numbers are taken as-is; finite decimals are truncated toward zero
/// (`"2015.0"` and `2015.9` both give 2015). Anything else is rejected.
pub fn parse_year(year: impl Display) -> Result<i32, FarsError> {
    let raw = year.to_string();
    coerce_integer(&raw).ok_or(FarsError::InvalidYear(raw))
}

/// Integer coercion shared by year and state codes.
pub(crate) fn coerce_integer(raw: &str) -> Option<i32> {
    let text = raw.trim();
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value.trunc().abs() <= i32::MAX as f64 => {
            Some(value.trunc() as i32)
        }
        _ => None,
    }
}

/// Returns the compressed file name holding the accidents for `year`,
/// e.g. `accident_2015.csv.bz2`.
pub fn filename_for(year: impl Display) -> Result<String, FarsError> {
    let year = parse_year(year)?;
    Ok(format!("accident_{year}.csv.bz2"))
}
