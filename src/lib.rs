//! numtree - enumerate every arithmetic expression over a fixed set of constants
//!
//! Each constant is used exactly once per expression and combined with
//! `+ - * /`. Complete expressions are evaluated exactly and grouped by the
//! value they produce.

pub mod expression;
pub mod report;
pub mod search;
pub mod utils;

// Re-export the main public API
pub use expression::{ExpressionError, ExpressionTree, Operator};
pub use search::{ExpressionSearch, ResultStore, SearchConfig, SearchError, SearchOutcome};
pub use utils::{UtilsError, parse_sources};

/// Enumerate every expression over the given decimal strings
///
/// This is a convenience function that validates the sources and runs a
/// sequential search with the default configuration.
///
/// # Arguments
///
/// * `sources` - Decimal numbers, each used exactly once per expression
///
/// # Errors
///
/// This function will return an error if:
/// * The list of sources is empty
/// * A source is not a plain decimal number or is out of range
///
/// # Examples
///
/// ```
/// use numtree::enumerate_expressions;
///
/// let outcome = enumerate_expressions(&["1", "3"]).unwrap();
/// let four: bigdecimal::BigDecimal = "4".parse().unwrap();
/// assert!(outcome.results.get(&four).is_some());
/// ```
pub fn enumerate_expressions<S: AsRef<str>>(sources: &[S]) -> Result<SearchOutcome, SearchError> {
    let sources = parse_sources(sources)?;

    let search = ExpressionSearch::default();
    search.search(&sources)
}
