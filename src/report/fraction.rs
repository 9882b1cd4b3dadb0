use bigdecimal::{BigDecimal, RoundingMode, Zero};

use crate::expression::clamp;

fn truncate(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Down)
}

/// Approximate `value` as `n/d` by continued fractions.
///
/// Stops once the approximation is within `epsilon` or after
/// `max_iterations` terms. Values within `epsilon` above an integer, and
/// approximations with a denominator of one, print as plain integers.
pub fn decimal_to_fraction(
    value: &BigDecimal,
    epsilon: &BigDecimal,
    max_iterations: usize,
) -> String {
    let sign = if value < &BigDecimal::zero() { "-" } else { "" };
    let target = value.abs();

    let whole = truncate(&target);
    if (&target - &whole).abs() < *epsilon {
        return format!("{}{}", sign, whole);
    }

    let mut z = target.clone();
    let mut previous = BigDecimal::zero();
    let mut denominator = BigDecimal::from(1);
    let mut numerator = target.with_scale_round(0, RoundingMode::HalfEven);
    let mut terms = 1;

    while terms < max_iterations && (&numerator / &denominator - &target).abs() > *epsilon {
        let remainder = &z - &truncate(&z);
        if remainder.is_zero() {
            break;
        }
        z = match clamp(BigDecimal::from(1) / remainder) {
            Ok(next) => next,
            Err(_) => break,
        };

        let next = &denominator * &truncate(&z) + &previous;
        previous = std::mem::replace(&mut denominator, next);
        numerator = (&target * &denominator).with_scale_round(0, RoundingMode::HalfEven);
        terms += 1;
    }

    if denominator == BigDecimal::from(1) {
        format!("{}{}", sign, numerator)
    } else {
        format!("{}{}/{}", sign, numerator, denominator)
    }
}
