//! Expression trees: arena model, expansion, canonical hashing and exact evaluation

mod ast;
mod display;
mod errors;
mod eval;
mod expand;
mod hash;

pub use ast::{ExpressionTree, Node, NodeId, Operator};
pub use errors::{ExpressionError, TreeError};
pub use eval::{DECIMAL_MAX, KEY_SCALE, PRECISION, clamp, normalize};
pub use expand::Expansion;
pub use hash::{Fingerprint, OperatorCounts};

#[cfg(test)]
pub(crate) use ast::builders;

#[cfg(test)]
mod tests;
