//! Output formatting for the run summary.

use crate::cli::args::{OutputFormat, RowGroupArgs};
use crate::error::Result;
use crate::pipeline::RunSummary;

/// Render a run summary in the format selected on the command line.
pub fn render_summary(summary: &RunSummary, args: &RowGroupArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(render_human(summary, args.verbosity())),
        OutputFormat::Json => render_json(summary, args.pretty),
    }
}

/// Print a run summary to stdout.
pub fn output_summary(summary: &RunSummary, args: &RowGroupArgs) -> Result<()> {
    let rendered = render_summary(summary, args)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn render_human(summary: &RunSummary, verbosity: u8) -> String {
    if verbosity == 0 {
        return String::new();
    }

    let mut lines = vec![
        format!("Time: {} ms", summary.elapsed_ms),
        format!(
            "Count groups with more than one elements: {}",
            summary.group_count
        ),
    ];

    if verbosity > 1 {
        lines.push(String::new());
        lines.push(format!("Input: {}", summary.input.display()));
        lines.push(format!("Output: {}", summary.output.display()));
        lines.push(format!("Policy: {}", summary.policy.name()));
        lines.push(format!("Lines read: {}", summary.rows.lines_read));
        lines.push(format!("Rejected lines: {}", summary.rows.rejected_lines));
        lines.push(format!("Duplicate rows: {}", summary.rows.duplicate_rows));
        lines.push(format!("Distinct rows: {}", summary.unique_rows));
        lines.push(format!("Grouped rows: {}", summary.grouped_rows));
    }

    lines.join("\n")
}

fn render_json(summary: &RunSummary, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparisonPolicy;
    use crate::row::row_set::RowSetStats;
    use chrono::Utc;
    use clap::Parser;
    use std::path::PathBuf;

    fn summary() -> RunSummary {
        RunSummary {
            input: PathBuf::from("in.txt"),
            output: PathBuf::from("output.txt"),
            policy: ComparisonPolicy::SameLength,
            started_at: Utc::now(),
            elapsed_ms: 42,
            rows: RowSetStats {
                lines_read: 10,
                accepted_lines: 8,
                rejected_lines: 2,
                duplicate_rows: 1,
            },
            unique_rows: 7,
            group_count: 3,
            grouped_rows: 6,
        }
    }

    #[test]
    fn test_human_summary() {
        let args = RowGroupArgs::try_parse_from(["rowgroup", "in.txt"]).unwrap();
        let rendered = render_summary(&summary(), &args).unwrap();
        assert_eq!(
            rendered,
            "Time: 42 ms\nCount groups with more than one elements: 3"
        );
    }

    #[test]
    fn test_verbose_human_summary() {
        let args = RowGroupArgs::try_parse_from(["rowgroup", "in.txt", "-v"]).unwrap();
        let rendered = render_summary(&summary(), &args).unwrap();
        assert!(rendered.contains("Rejected lines: 2"));
        assert!(rendered.contains("Policy: same-length"));
    }

    #[test]
    fn test_quiet_summary_is_empty() {
        let args = RowGroupArgs::try_parse_from(["rowgroup", "in.txt", "-q"]).unwrap();
        assert!(render_summary(&summary(), &args).unwrap().is_empty());
    }

    #[test]
    fn test_json_summary() {
        let args =
            RowGroupArgs::try_parse_from(["rowgroup", "in.txt", "--format", "json"]).unwrap();
        let rendered = render_summary(&summary(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["group_count"], 3);
        assert_eq!(value["policy"], "same-length");
        assert_eq!(value["rows"]["rejected_lines"], 2);
    }
}
