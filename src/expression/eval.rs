use std::sync::LazyLock;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use log::trace;
use num_bigint::BigInt;

use crate::expression::ast::{ExpressionTree, Node, NodeId, Operator};
use crate::expression::errors::ExpressionError;

/// Significant digits kept after every arithmetic operation
pub const PRECISION: u64 = 28;

/// Decimal places kept in a result store key
pub const KEY_SCALE: i64 = 4;

/// Largest magnitude a value may reach (the 96-bit decimal range)
pub static DECIMAL_MAX: LazyLock<BigDecimal> = LazyLock::new(|| {
    BigDecimal::new(BigInt::from(79_228_162_514_264_337_593_543_950_335_u128), 0)
});

/// Clamp a value to [`PRECISION`] significant digits, rejecting values
/// outside the representable range.
///
/// The range check applies to the rounded value, so a result never
/// exceeds [`DECIMAL_MAX`] even when rounding carries upwards.
///
/// # Errors
///
/// Returns [`ExpressionError::Overflow`] when the rounded magnitude
/// exceeds [`DECIMAL_MAX`].
pub fn clamp(value: BigDecimal) -> Result<BigDecimal, ExpressionError> {
    let value = if value.digits() > PRECISION {
        value.with_prec(PRECISION)
    } else {
        value
    };
    if value.abs() > *DECIMAL_MAX {
        return Err(ExpressionError::Overflow);
    }
    Ok(value)
}

/// Bucket key for an evaluated value: rounded half-to-even at
/// [`KEY_SCALE`] places, then made non-negative.
pub fn normalize(value: &BigDecimal) -> BigDecimal {
    value
        .with_scale_round(KEY_SCALE, RoundingMode::HalfEven)
        .abs()
}

fn apply(
    op: Operator,
    left: &BigDecimal,
    right: &BigDecimal,
) -> Result<BigDecimal, ExpressionError> {
    let raw = match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => {
            if right.is_zero() {
                return Err(ExpressionError::DivisionByZero);
            }
            left / right
        }
    };
    clamp(raw)
}

impl ExpressionTree {
    /// # Errors
    ///
    /// Returns an error when a division has a zero divisor or any
    /// intermediate result leaves the representable range.
    pub fn evaluate(&self) -> Result<BigDecimal, ExpressionError> {
        let result = self.evaluate_node(self.root);

        match &result {
            Ok(value) => trace!("Expression {} evaluated to {}", self, value),
            Err(e) => trace!("Expression {} discarded: {}", self, e),
        }

        result
    }

    fn evaluate_node(&self, id: NodeId) -> Result<BigDecimal, ExpressionError> {
        match &self[id] {
            Node::Constant(value) => clamp(value.clone()),
            Node::Binary { op, left, right } => {
                let left = self.evaluate_node(*left)?;
                let right = self.evaluate_node(*right)?;
                apply(*op, &left, &right)
            }
        }
    }
}
