use thiserror::Error;

use crate::expression::ast::NodeId;

/// Errors that can occur during expression evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result exceeds the representable decimal range")]
    Overflow,
}

/// Errors raised while rewriting a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Active site {site:?} must be referenced exactly once, found {occurrences}")]
    ActiveSiteNotFound { site: NodeId, occurrences: usize },
}
