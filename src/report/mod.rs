//! Rendering of finished searches: bucket ranking, fractions, HTML and text tables

mod fraction;
mod html;
mod text;

use bigdecimal::{BigDecimal, RoundingMode};

use crate::expression::ExpressionTree;
use crate::search::ResultStore;

pub use fraction::decimal_to_fraction;
pub use html::render_html;
pub use text::render_text;

/// Configuration for report rendering
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Tolerance of the fraction approximation of bucket keys
    pub epsilon: BigDecimal,
    pub max_fraction_iterations: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            epsilon: BigDecimal::new(1.into(), 4),
            max_fraction_iterations: 20,
        }
    }
}

fn distance_to_integer(value: &BigDecimal) -> BigDecimal {
    (value - value.with_scale_round(0, RoundingMode::HalfEven)).abs()
}

/// Buckets ordered for display: integral values first, then by how far the
/// value is from an integer, then by how few expressions reach it.
pub fn rank(store: &ResultStore) -> Vec<(&BigDecimal, &[ExpressionTree])> {
    let mut ranked: Vec<_> = store
        .iter()
        .map(|(key, trees)| (distance_to_integer(key), key, trees))
        .collect();

    ranked.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.2.len().cmp(&b.2.len()))
            .then_with(|| a.1.cmp(b.1))
    });

    ranked
        .into_iter()
        .map(|(_, key, trees)| (key, trees))
        .collect()
}
