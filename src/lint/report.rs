//! Formatting of lint results.
//!
//! Pure string formatting; the only output these functions produce is
//! the returned value.

use serde::Serialize;

use super::{Finding, Severity};

/// Format findings for terminal output.
///
/// Findings are grouped into errors, then warnings, then info. An empty
/// list short-circuits to a fixed no-issues line.
pub fn format_findings(findings: &[Finding], file_path: Option<&str>, show_summary: bool) -> String {
    if findings.is_empty() {
        return "✓ No issues found".to_string();
    }

    let mut lines = Vec::new();

    if let Some(path) = file_path {
        lines.push(format!("\n{path}"));
        lines.push("-".repeat(path.chars().count()));
    }

    let by_severity = |severity: Severity| findings.iter().filter(move |f| f.severity == severity);

    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        for finding in by_severity(severity) {
            lines.push(format!("  {finding}"));
        }
    }

    if show_summary {
        let errors = by_severity(Severity::Error).count();
        let warnings = by_severity(Severity::Warning).count();
        let info = by_severity(Severity::Info).count();

        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{errors} error(s)"));
        }
        if warnings > 0 {
            parts.push(format!("{warnings} warning(s)"));
        }
        if info > 0 {
            parts.push(format!("{info} info"));
        }

        lines.push(String::new());
        lines.push(format!("Summary: {}", parts.join(", ")));
    }

    lines.join("\n")
}

/// Format directory-level discovery counts.
pub fn format_discovery_summary(activities: usize, workflows: usize, failures: usize) -> String {
    let mut lines = vec![
        format!(
            "Found {activities} activit{}",
            if activities == 1 { "y" } else { "ies" }
        ),
        format!("Found {workflows} workflow{}", if workflows == 1 { "" } else { "s" }),
    ];
    if failures > 0 {
        lines.push(format!("Encountered {failures} load error(s)"));
    }
    lines.join("\n")
}

/// Lint results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub activities_found: usize,
    pub workflows_found: usize,
    pub errors: Vec<Finding>,
}

impl FileReport {
    /// Whether this file produced findings or any components at all.
    pub fn is_relevant(&self) -> bool {
        self.activities_found > 0 || self.workflows_found > 0 || !self.errors.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|f| f.severity == severity).count()
    }
}

/// Aggregated totals across a lint run.
#[derive(Debug, Clone, Serialize)]
pub struct LintSummary {
    pub total_activities: usize,
    pub total_workflows: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_info: usize,
    pub passed: bool,
}

/// The machine-readable shape of a complete lint run.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub results: Vec<FileReport>,
    pub summary: LintSummary,
}

impl LintReport {
    /// Aggregate per-file results into a report with totals.
    pub fn new(results: Vec<FileReport>) -> Self {
        let total_errors: usize = results.iter().map(|r| r.count(Severity::Error)).sum();
        let summary = LintSummary {
            total_activities: results.iter().map(|r| r.activities_found).sum(),
            total_workflows: results.iter().map(|r| r.workflows_found).sum(),
            total_errors,
            total_warnings: results.iter().map(|r| r.count(Severity::Warning)).sum(),
            total_info: results.iter().map(|r| r.count(Severity::Info)).sum(),
            passed: total_errors == 0,
        };
        Self { results, summary }
    }
}
