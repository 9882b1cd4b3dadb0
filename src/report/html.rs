use std::fmt::{self, Write};

use bigdecimal::BigDecimal;

use crate::report::{ReportConfig, decimal_to_fraction, rank};
use crate::search::SearchOutcome;

/// Render a finished search as an HTML table, one row per value.
///
/// # Errors
///
/// Only fails if formatting into the output buffer fails.
pub fn render_html(
    sources: &[BigDecimal],
    outcome: &SearchOutcome,
    config: &ReportConfig,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let names: Vec<String> = sources.iter().map(ToString::to_string).collect();
    writeln!(out, "<h1>Possible combinations for {}</h1>", names.join(",&nbsp;"))?;
    writeln!(out, "<p>Completed in {} iterations</p>", outcome.iterations)?;

    writeln!(out, "<table>")?;
    writeln!(out, "<tr><td>#</td><td>expressions</td></tr>")?;

    for (key, trees) in rank(&outcome.results) {
        let fraction = decimal_to_fraction(key, &config.epsilon, config.max_fraction_iterations);
        writeln!(out, "<tr>")?;
        writeln!(out, "<td>{:>3} results for {}:</td>", trees.len(), fraction)?;
        write!(out, "<td style='border-bottom: 1px solid black'>")?;
        for tree in trees {
            let divisions = tree.operator_counts().divide;
            writeln!(out, "{:>20} [{}]<br/>", tree, divisions)?;
        }
        writeln!(out, "</td>")?;
        writeln!(out, "</tr>")?;
    }

    writeln!(out, "</table>")?;
    Ok(out)
}
