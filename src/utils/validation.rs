use bigdecimal::BigDecimal;
use log::{debug, warn};

use crate::expression::clamp;
use crate::utils::errors::UtilsError;

/// Parse a single source constant.
///
/// # Errors
///
/// Returns an error if the string is not a plain decimal number or its
/// magnitude, once rounded to the working precision, exceeds the
/// representable range.
pub fn parse_source(source: &str) -> Result<BigDecimal, UtilsError> {
    let trimmed = source.trim();

    // BigDecimal also accepts exponents; sources are plain decimals only
    let plain = trimmed
        .strip_prefix(['-', '+'])
        .unwrap_or(trimmed)
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.');
    if trimmed.is_empty() || !plain {
        warn!("Source is not a decimal number: '{}'", source);
        return Err(UtilsError::InvalidSource(source.to_string()));
    }

    let value = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .parse::<BigDecimal>()
        .map_err(|_| UtilsError::InvalidSource(source.to_string()))?;

    // sources are held at the same precision as every computed value
    let value = clamp(value).map_err(|_| {
        warn!("Source is out of range: '{}'", source);
        UtilsError::OutOfRange(source.to_string())
    })?;

    debug!("Parsed source '{}' as {}", source, value);
    Ok(value)
}

/// Parse every source constant, keeping order and repeats.
///
/// # Errors
///
/// Returns an error if the list is empty or any entry fails [`parse_source`].
pub fn parse_sources<S: AsRef<str>>(sources: &[S]) -> Result<Vec<BigDecimal>, UtilsError> {
    if sources.is_empty() {
        warn!("No source constants given");
        return Err(UtilsError::EmptySources);
    }

    sources.iter().map(|s| parse_source(s.as_ref())).collect()
}
