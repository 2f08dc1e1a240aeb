//! Rule evaluation for activity functions and workflow classes.
//!
//! Rules run independently and findings are appended in declaration
//! order; only the missing-decorator check short-circuits, since
//! without metadata there is nothing further to validate. Rules that
//! need the signature are skipped when it could not be introspected.

use super::{codes, Finding, Severity, Target};
use crate::discovery::{ActivityCandidate, WorkflowCandidate};
use crate::parser::ParamDefault;

/// Parameters that never need a structured descriptor.
const SPECIAL_PARAMS: [&str; 3] = ["self", "cls", "input_data"];

/// Validate an activity function against the rule set for `target`.
pub fn validate_activity(candidate: &ActivityCandidate, target: Target) -> Vec<Finding> {
    let mut findings = Vec::new();
    let def = &candidate.def;
    let location = def.name.as_str();

    if candidate.meta.is_none() {
        findings.push(Finding::new(
            codes::MISSING_ACTIVITY_DECORATOR,
            Severity::Error,
            "Activity must have @activity decorator",
            location,
        ));
        return findings;
    }

    if target == Target::Temporal && !def.is_async {
        findings.push(Finding::new(
            codes::ACTIVITY_MUST_BE_ASYNC,
            Severity::Error,
            "Activity function must be async def",
            location,
        ));
    }

    if target == Target::Airflow && def.is_async {
        findings.push(Finding::new(
            codes::ACTIVITY_ASYNC_DISCOURAGED,
            Severity::Warning,
            "Airflow tasks should be synchronous functions",
            location,
        ));
    }

    if let Some(params) = &def.signature {
        if !params.iter().any(|p| p.name == "input_data") {
            findings.push(Finding::new(
                codes::ACTIVITY_MISSING_INPUT_PARAM,
                Severity::Warning,
                "Activity should accept input_data parameter",
                location,
            ));
        }

        if target == Target::Airflow && !def.has_var_kwargs() {
            findings.push(Finding::new(
                codes::ACTIVITY_MISSING_CONTEXT_CAPTURE,
                Severity::Info,
                "Airflow tasks should accept **kwargs to capture context variables",
                location,
            ));
        }
    }

    if def.return_annotation.is_none() {
        findings.push(Finding::new(
            codes::ACTIVITY_MISSING_RETURN_ANNOTATION,
            Severity::Warning,
            "Activity should have return type annotation (-> Dict[str, Any])",
            location,
        ));
    }

    if let Some(params) = &def.signature {
        for param in params {
            if SPECIAL_PARAMS.contains(&param.name.as_str()) {
                continue;
            }
            match &param.default {
                Some(ParamDefault::Structured(_)) | None => {}
                Some(_) => findings.push(Finding::new(
                    codes::ACTIVITY_PARAMETER_NOT_STRUCTURED,
                    Severity::Info,
                    format!(
                        "Parameter \"{}\" should use Parameter() for UI metadata",
                        param.name
                    ),
                    location,
                )),
            }
        }
    }

    findings
}

/// Validate a workflow class against the rule set.
///
/// The `target` selector is accepted for symmetry with activities; the
/// current workflow rules apply to both backends.
pub fn validate_workflow(candidate: &WorkflowCandidate, _target: Target) -> Vec<Finding> {
    let mut findings = Vec::new();
    let def = &candidate.def;
    let location = def.name.as_str();

    if candidate.meta.is_none() {
        findings.push(Finding::new(
            codes::MISSING_WORKFLOW_DECORATOR,
            Severity::Error,
            "Workflow class must have @workflow decorator",
            location,
        ));
        return findings;
    }

    if def.method("run").is_none() {
        findings.push(Finding::new(
            codes::WORKFLOW_MISSING_RUN_METHOD,
            Severity::Error,
            "Workflow must have a run() method",
            location,
        ));
    }

    findings
}
