//! Input helpers

mod errors;
mod validation;

pub use errors::UtilsError;
pub use validation::{parse_source, parse_sources};
