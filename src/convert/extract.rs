//! Metadata extraction for code generation.
//!
//! Merges decorator metadata with signature-derived details into the
//! export records the generators consume. Calling the extractor on an
//! undecorated candidate is a contract violation, not a recoverable
//! condition.

use serde::Serialize;

use crate::discovery::{ActivityCandidate, WorkflowCandidate};
use crate::error::{Error, Result};
use crate::meta::ParamSpec;
use crate::parser::{ParamDefault, ParamKind, PyLiteral};

/// Parameters excluded from extraction.
const SPECIAL_PARAMS: [&str; 3] = ["self", "cls", "input_data"];

/// One extracted activity parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterExport {
    pub name: String,

    /// Type annotation source text, if any
    pub annotation: Option<String>,

    /// Structured descriptor fields, when the default was `Parameter(...)`
    pub spec: Option<ParamSpec>,

    /// Plain literal default, when the default was not structured
    pub default: Option<PyLiteral>,
}

/// Everything the generators need to know about one activity.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityExport {
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    pub tags: Vec<String>,
    pub function_name: String,
    pub is_async: bool,
    pub parameters: Vec<ParameterExport>,
    pub docstring: Option<String>,
    pub return_type: Option<String>,
}

/// Details of a workflow's `run` method.
#[derive(Debug, Clone, Serialize)]
pub struct RunExport {
    pub signature: String,
    pub docstring: Option<String>,
    pub is_async: bool,
}

/// Everything the generators need to know about one workflow.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowExport {
    pub name: String,
    pub description: String,
    pub version: String,
    pub task_queue: String,
    pub dag_id: String,
    pub schedule: Option<String>,
    pub class_name: String,
    pub docstring: Option<String>,
    pub run: Option<RunExport>,
}

/// Complete extraction result for one conversion.
#[derive(Debug, Clone, Serialize)]
pub struct AllExport {
    pub activities: Vec<ActivityExport>,
    pub workflows: Vec<WorkflowExport>,
}

/// Extract the full metadata record for an `@activity` function.
pub fn extract_activity(candidate: &ActivityCandidate) -> Result<ActivityExport> {
    let meta = candidate
        .meta
        .as_ref()
        .ok_or_else(|| Error::UndecoratedActivity(candidate.def.name.clone()))?;

    let parameters = candidate
        .def
        .signature
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|p| p.kind == ParamKind::Regular)
        .filter(|p| !SPECIAL_PARAMS.contains(&p.name.as_str()))
        .map(|p| {
            let (spec, default) = match &p.default {
                Some(ParamDefault::Structured(spec)) => (Some(spec.clone()), None),
                Some(ParamDefault::Literal(lit)) => (None, Some(lit.clone())),
                Some(ParamDefault::Raw(_)) | None => (None, None),
            };
            ParameterExport { name: p.name.clone(), annotation: p.annotation.clone(), spec, default }
        })
        .collect();

    Ok(ActivityExport {
        name: meta.name.clone(),
        description: meta.description.clone(),
        category: meta.category.clone(),
        icon: meta.icon.clone(),
        tags: meta.tags.clone(),
        function_name: meta.function_name.clone(),
        is_async: candidate.def.is_async,
        parameters,
        docstring: candidate.def.docstring.clone(),
        return_type: candidate.def.return_annotation.clone(),
    })
}

/// Extract the full metadata record for a `@workflow` class.
pub fn extract_workflow(candidate: &WorkflowCandidate) -> Result<WorkflowExport> {
    let meta = candidate
        .meta
        .as_ref()
        .ok_or_else(|| Error::UndecoratedWorkflow(candidate.def.name.clone()))?;

    let run = candidate.def.method("run").map(|run| RunExport {
        signature: run.signature_text(),
        docstring: run.docstring.clone(),
        is_async: run.is_async,
    });

    Ok(WorkflowExport {
        name: meta.name.clone(),
        description: meta.description.clone(),
        version: meta.version.clone(),
        task_queue: meta.task_queue.clone(),
        dag_id: meta.dag_id.clone(),
        schedule: meta.schedule.clone(),
        class_name: candidate.def.name.clone(),
        docstring: candidate.def.docstring.clone(),
        run,
    })
}

/// Extract every activity and workflow in one pass.
pub fn extract_all(
    activities: &[ActivityCandidate],
    workflows: &[WorkflowCandidate],
) -> Result<AllExport> {
    Ok(AllExport {
        activities: activities.iter().map(extract_activity).collect::<Result<_>>()?,
        workflows: workflows.iter().map(extract_workflow).collect::<Result<_>>()?,
    })
}
