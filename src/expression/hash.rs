//! Canonical fingerprint used to prune equivalent trees before evaluation.
//!
//! The hash is a heuristic: equal trees always collide, and so do a few
//! trees that only differ by signs under multiplication or division. It is
//! never used as a value key.

use std::hash::{Hash, Hasher};

use bigdecimal::{BigDecimal, Zero};
use rustc_hash::FxHasher;

use crate::expression::ast::{ExpressionTree, Node, NodeId, Operator};

/// Multiplier applied to non-positive constants when signs still matter
const SIGN_FOLD: i64 = 17;

const SIGN_BIT: u64 = 1 << 63;

/// How many times each operator appears in a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorCounts {
    pub add: usize,
    pub subtract: usize,
    pub multiply: usize,
    pub divide: usize,
}

impl OperatorCounts {
    pub fn get(&self, op: Operator) -> usize {
        match op {
            Operator::Add => self.add,
            Operator::Subtract => self.subtract,
            Operator::Multiply => self.multiply,
            Operator::Divide => self.divide,
        }
    }

    fn bump(mut self, op: Operator) -> Self {
        match op {
            Operator::Add => self.add += 1,
            Operator::Subtract => self.subtract += 1,
            Operator::Multiply => self.multiply += 1,
            Operator::Divide => self.divide += 1,
        }
        self
    }
}

/// Result of one canonical traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub hash: u64,
    pub counts: OperatorCounts,
}

/// State threaded through the fold in traversal order
#[derive(Debug, Clone, Copy)]
struct Fold {
    hash: u64,
    sign_is_irrelevant: bool,
    counts: OperatorCounts,
}

fn structural_code(op: Operator) -> u64 {
    match op {
        Operator::Add => 0x9E37_79B9_7F4A_7C15,
        Operator::Subtract => 0xC2B2_AE3D_27D4_EB4F,
        Operator::Multiply => 0x1656_67B1_9E37_79F9,
        Operator::Divide => 0x27D4_EB2F_1656_67C5,
    }
}

/// Hash of a decimal that ignores trailing zeros in its representation.
///
/// Negation only flips the top bit. Since `(x ^ TOP) * 3 == (x * 3) ^ TOP`
/// in wrapping arithmetic, an even number of negated constants cancels out
/// in the final hash.
pub(crate) fn representation_invariant_hash(value: &BigDecimal) -> u64 {
    let (mantissa, exponent) = value.abs().normalized().as_bigint_and_exponent();
    let mut hasher = FxHasher::default();
    mantissa.hash(&mut hasher);
    exponent.hash(&mut hasher);
    let magnitude = hasher.finish() & !SIGN_BIT;
    if value < &BigDecimal::zero() {
        magnitude | SIGN_BIT
    } else {
        magnitude
    }
}

fn mix(hash: u64, value: u64) -> u64 {
    hash.wrapping_mul(3) ^ value
}

fn fold(tree: &ExpressionTree, id: NodeId, state: Fold) -> Fold {
    match &tree[id] {
        Node::Binary { op, left, right } => {
            // The flag is not restored after the subtree: constants visited
            // later in traversal order still see the last operator's flag.
            let state = Fold {
                hash: mix(state.hash, structural_code(*op)),
                sign_is_irrelevant: op.is_multiplicative(),
                counts: state.counts.bump(*op),
            };
            let state = fold(tree, *left, state);
            fold(tree, *right, state)
        }
        Node::Constant(value) => {
            let code = if state.sign_is_irrelevant || value > &BigDecimal::zero() {
                representation_invariant_hash(value)
            } else {
                representation_invariant_hash(&(value * &BigDecimal::from(SIGN_FOLD)))
            };
            Fold {
                hash: mix(state.hash, code),
                ..state
            }
        }
    }
}

impl ExpressionTree {
    /// Walk the tree once, producing its canonical hash and operator counts
    pub fn fingerprint(&self) -> Fingerprint {
        let done = fold(
            self,
            self.root,
            Fold {
                hash: 0,
                sign_is_irrelevant: false,
                counts: OperatorCounts::default(),
            },
        );
        Fingerprint {
            hash: done.hash,
            counts: done.counts,
        }
    }

    pub fn canonical_hash(&self) -> u64 {
        self.fingerprint().hash
    }

    pub fn operator_counts(&self) -> OperatorCounts {
        self.fingerprint().counts
    }
}
