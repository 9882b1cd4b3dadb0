use thiserror::Error;

/// Errors that can occur while reading source constants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("At least one source constant is required")]
    EmptySources,
    #[error("Source must be a decimal number: {0}")]
    InvalidSource(String),
    #[error("Source is outside the representable decimal range: {0}")]
    OutOfRange(String),
}
