//! Command implementation for the rowgroup CLI.

use crate::cli::args::RowGroupArgs;
use crate::cli::output::output_summary;
use crate::error::Result;
use crate::pipeline::{GroupingEngine, RunSummary};

/// Execute a grouping run described by the CLI arguments.
pub fn execute_command(args: RowGroupArgs) -> Result<()> {
    let summary = run_grouping(&args)?;
    output_summary(&summary, &args)
}

/// Run the pipeline without printing anything.
pub fn run_grouping(args: &RowGroupArgs) -> Result<RunSummary> {
    let config = args.to_config();
    log::debug!(
        "Grouping {} into {} ({})",
        args.input.display(),
        config.output_path.display(),
        config.policy.name()
    );

    let engine = GroupingEngine::new(config)?;
    engine.run(&args.input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowGroupError;
    use clap::Parser;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_grouping() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("groups.txt");
        fs::write(&input, "\"1\";\"2\"\n\"1\";\"2\";\"3\"\n\"1\";\"4\"\n").unwrap();

        let args = RowGroupArgs::try_parse_from([
            OsStr::new("rowgroup"),
            input.as_os_str(),
            OsStr::new("--output"),
            output.as_os_str(),
        ])
        .unwrap();
        let summary = run_grouping(&args).unwrap();

        assert_eq!(summary.group_count, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "Group 1\n1;2\n1;4\n\n");
    }

    #[test]
    fn test_missing_input_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nope.txt");

        let args =
            RowGroupArgs::try_parse_from([OsStr::new("rowgroup"), input.as_os_str()]).unwrap();
        let err = run_grouping(&args).unwrap_err();

        assert!(matches!(err, RowGroupError::InputNotFound(_)));
        assert_eq!(err.to_string(), format!("File {} not found", input.display()));
    }
}
