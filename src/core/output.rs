//! Public output types for rewrite runs.
//!
//! Used by the CLI for both the human summary and the `--json` envelope.

use serde::Serialize;

use crate::error::Error;

/// Outcome for one successfully processed file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path as given on the command line.
    pub file: String,
    /// Bare file name, used in the console summary.
    pub name: String,
    pub replacements: usize,
    /// Whether new content was written back to disk.
    pub modified: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub import_added: bool,
}

/// A file that could not be processed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file: String,
    pub code: String,
    pub error: String,
}

/// Aggregate result of a rewrite run. Failed files are listed but excluded
/// from the totals.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub rules: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
    pub total_files: usize,
    pub total_replacements: usize,
    pub files_modified: usize,
}

impl RunSummary {
    pub fn new(rules: impl Into<String>, dry_run: bool) -> Self {
        RunSummary {
            rules: rules.into(),
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, report: FileReport) {
        self.total_files += 1;
        self.total_replacements += report.replacements;
        if report.modified {
            self.files_modified += 1;
        }
        self.files.push(report);
    }

    pub fn record_failure(&mut self, file: impl Into<String>, error: &Error) {
        self.failures.push(FileFailure {
            file: file.into(),
            code: error.code.as_str().to_string(),
            error: error.describe(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, replacements: usize, modified: bool) -> FileReport {
        FileReport {
            file: format!("src/{}", name),
            name: name.to_string(),
            replacements,
            modified,
            import_added: modified,
        }
    }

    #[test]
    fn totals_count_only_successes() {
        let mut summary = RunSummary::new("console", false);
        summary.record_success(report("a.ts", 3, true));
        summary.record_success(report("b.ts", 0, false));
        summary.record_failure("missing.ts", &Error::file_not_found("missing.ts"));

        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_replacements, 3);
        assert_eq!(summary.files_modified, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].code, "file.not_found");
    }

    #[test]
    fn serializes_camel_case() {
        let mut summary = RunSummary::new("icons", true);
        summary.record_success(report("a.ts", 1, true));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["dryRun"], true);
        assert_eq!(json["totalReplacements"], 1);
        assert_eq!(json["files"][0]["importAdded"], true);
        assert!(json.get("failures").is_none());
    }
}
