//! Lint findings, severities and rule codes.

mod report;
mod rules;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

pub use report::{
    format_discovery_summary, format_findings, FileReport, LintReport, LintSummary,
};
pub use rules::{validate_activity, validate_workflow};

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Marker glyph used by the text reporter.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Target orchestration backend the rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Target {
    /// Temporal worker applications (primary)
    #[default]
    Temporal,
    /// Airflow DAGs (secondary)
    Airflow,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temporal => write!(f, "temporal"),
            Self::Airflow => write!(f, "airflow"),
        }
    }
}

/// Stable rule identifiers. These codes are part of the tool's output
/// contract; do not rename them.
pub mod codes {
    pub const MODULE_LOAD_FAILED: &str = "module-load-failed";
    pub const MISSING_ACTIVITY_DECORATOR: &str = "missing-activity-decorator";
    pub const ACTIVITY_MUST_BE_ASYNC: &str = "activity-must-be-async";
    pub const ACTIVITY_ASYNC_DISCOURAGED: &str = "activity-async-discouraged";
    pub const ACTIVITY_MISSING_INPUT_PARAM: &str = "activity-missing-input-param";
    pub const ACTIVITY_MISSING_CONTEXT_CAPTURE: &str = "activity-missing-context-capture";
    pub const ACTIVITY_MISSING_RETURN_ANNOTATION: &str = "activity-missing-return-annotation";
    pub const ACTIVITY_PARAMETER_NOT_STRUCTURED: &str = "activity-parameter-not-structured";
    pub const MISSING_WORKFLOW_DECORATOR: &str = "missing-workflow-decorator";
    pub const WORKFLOW_MISSING_RUN_METHOD: &str = "workflow-missing-run-method";
}

/// An immutable lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Stable rule identifier
    pub rule_id: String,

    /// Severity of the finding
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Symbol (or file) the finding pertains to
    pub location: String,
}

impl Finding {
    pub fn new(
        rule_id: &str,
        severity: Severity,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.into(),
            location: location.into(),
        }
    }

    /// Finding reported when a source file fails to load.
    pub fn load_failure(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(codes::MODULE_LOAD_FAILED, Severity::Error, message, location)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]: {}",
            self.severity.marker(),
            self.rule_id,
            self.location,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(
            codes::ACTIVITY_MUST_BE_ASYNC,
            Severity::Error,
            "Activity function must be async def",
            "my_func",
        );
        assert_eq!(
            finding.to_string(),
            "✗ activity-must-be-async [my_func]: Activity function must be async def"
        );
    }
}
