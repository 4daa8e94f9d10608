//! `check` — lex and parse one or more script files, reporting every
//! syntax error found. Does not build bytecode or run anything; that
//! belongs to a driver built on top of `glyph-runtime`.

use std::path::PathBuf;

use glyph_par::{parse_source, CollectingSink};

use crate::commands::common::{error_messages, output_messages};
use crate::commands::traits::{Command, CommandDescription};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub verbose: bool,
    pub files: Vec<PathBuf>,
}

/// Per-file outcome: how many statements parsed, and the errors found.
pub struct FileReport {
    pub path: PathBuf,
    pub statement_count: usize,
    pub errors: Vec<String>,
}

pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    pub fn run(&self) -> Result<Vec<FileReport>> {
        if self.args.files.is_empty() {
            return Err(CliError::Validation(error_messages::NO_INPUT_FILES.to_string()));
        }

        let mut reports = Vec::with_capacity(self.args.files.len());
        let mut failed = 0usize;
        for path in &self.args.files {
            let report = self.check_one(path)?;
            if !report.errors.is_empty() {
                failed += 1;
            }
            if self.args.verbose {
                self.print_report(&report);
            }
            reports.push(report);
        }

        if failed > 0 {
            return Err(CliError::ChecksFailed(failed));
        }
        Ok(reports)
    }

    fn check_one(&self, path: &PathBuf) -> Result<FileReport> {
        let source = std::fs::read(path)?;
        let mut sink = CollectingSink::default();
        let results = parse_source(&source, 1, &mut sink);
        let statement_count = results.iter().filter(|r| r.is_ok()).count();
        let errors: Vec<String> = sink.errors.iter().map(|e| format!("line {}: {}", e.span.line, e.message)).collect();
        Ok(FileReport { path: path.clone(), statement_count, errors })
    }

    fn print_report(&self, report: &FileReport) {
        if report.errors.is_empty() {
            eprintln!("{}: {} ({} statement(s))", report.path.display(), output_messages::CHECK_OK, report.statement_count);
        } else {
            eprintln!("{}: {} ({})", report.path.display(), output_messages::CHECK_FAILED, report.errors.len());
            for message in &report.errors {
                eprintln!("  {message}");
            }
        }
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = Vec<FileReport>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Parse script files and report syntax errors"
    }
}

pub fn run_check(args: CheckArgs) -> Result<Vec<FileReport>> {
    CheckCommand::new(args).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    fn write_script(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn trait_metadata_matches_the_command() {
        assert_eq!(CheckCommand::name(), "check");
        assert!(!CheckCommand::description().is_empty());
    }

    #[test]
    fn clean_script_reports_no_errors() {
        let file = write_script(b"<?php $a = 1; $b = 2;");
        let args = CheckArgs { verbose: false, files: vec![file.path().to_path_buf()] };
        let reports = run_check(args).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].statement_count, 2);
        assert!(reports[0].errors.is_empty());
    }

    #[test]
    fn malformed_script_is_reported_and_fails_the_run() {
        let file = write_script(b"<?php 1 = 2;");
        let args = CheckArgs { verbose: false, files: vec![file.path().to_path_buf()] };
        assert!(run_check(args).is_err());
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let args = CheckArgs { verbose: false, files: vec![] };
        assert!(matches!(run_check(args), Err(CliError::Validation(_))));
    }
}
