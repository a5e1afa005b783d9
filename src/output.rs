//! Output formatting for directive results.
//!
//! Supports `(nodes,value)` tuples, space-separated columns for plotting
//! tools, and pretty-printed JSON.

use crate::analyzers::types::{DirectiveReport, GroupStats};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Tuples,
    SpaceSeparated,
    Json,
}

/// Renders `(nodes,value)` pairs on one line, followed by an empty line.
pub fn format_tuples(stats: &GroupStats) -> String {
    let mut output: String = stats
        .iter()
        .map(|(nodes, value)| format!("({},{})", nodes, value))
        .collect();
    output.push_str("\n\n");
    output
}

/// Renders one `nodes value` line per group, followed by an empty line.
pub fn format_space_separated(stats: &GroupStats) -> String {
    let mut output = String::new();
    for (nodes, value) in stats {
        output.push_str(&format!("{} {}\n", nodes, value));
    }
    output.push('\n');
    output
}

/// Renders a directive's result in the requested format.
pub fn format_report(report: &DirectiveReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tuples => Ok(format_tuples(report.values())),
        OutputFormat::SpaceSeparated => Ok(format_space_separated(report.values())),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProblemType;

    fn stats() -> GroupStats {
        GroupStats::from([(10, 1.5), (4, 11.0)])
    }

    #[test]
    fn test_format_tuples() {
        assert_eq!(format_tuples(&stats()), "(4,11)(10,1.5)\n\n");
    }

    #[test]
    fn test_format_tuples_empty() {
        assert_eq!(format_tuples(&GroupStats::new()), "\n\n");
    }

    #[test]
    fn test_format_space_separated() {
        assert_eq!(format_space_separated(&stats()), "4 11\n10 1.5\n\n");
    }

    #[test]
    fn test_format_json() {
        let report = DirectiveReport::new(
            "avg:objective".to_string(),
            ProblemType::BtsppApprox,
            stats(),
        );
        let output = format_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["directive"], "avg:objective");
        assert_eq!(value["problem_type"], "BTSPP-approx");
        assert_eq!(value["values"]["4"], 11.0);
        assert_eq!(value["values"]["10"], 1.5);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_format_report_dispatches() {
        let report = DirectiveReport::new("max:time".to_string(), ProblemType::BtspApprox, stats());

        assert_eq!(
            format_report(&report, OutputFormat::Tuples).unwrap(),
            format_tuples(&stats())
        );
        assert_eq!(
            format_report(&report, OutputFormat::SpaceSeparated).unwrap(),
            format_space_separated(&stats())
        );
    }
}
