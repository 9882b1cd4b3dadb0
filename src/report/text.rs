use std::fmt::{self, Write};

use bigdecimal::BigDecimal;

use crate::report::{ReportConfig, decimal_to_fraction, rank};
use crate::search::SearchOutcome;

/// Render a finished search as an indented plain-text listing
///
/// # Errors
///
/// Only fails if formatting into the output buffer fails.
pub fn render_text(
    sources: &[BigDecimal],
    outcome: &SearchOutcome,
    config: &ReportConfig,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let names: Vec<String> = sources.iter().map(ToString::to_string).collect();
    writeln!(out, "Possible combinations for {}", names.join(", "))?;

    for (key, trees) in rank(&outcome.results) {
        let fraction = decimal_to_fraction(key, &config.epsilon, config.max_fraction_iterations);
        writeln!(out)?;
        writeln!(out, "{:>3} results for {} ({}):", trees.len(), fraction, key)?;
        for tree in trees {
            writeln!(out, "    {:<30} [{}]", tree, tree.operator_counts().divide)?;
        }
    }

    Ok(out)
}
