//! Conversion of discovered DSL code into orchestration applications.
//!
//! The extractor turns validated candidates into rich export records;
//! the generator families map those records to output file sets for
//! each target backend. Generators perform no validation of their own.

mod airflow;
mod extract;
mod temporal;

pub use airflow::generate_all_airflow_files;
pub use extract::{
    extract_activity, extract_all, extract_workflow, ActivityExport, AllExport, ParameterExport,
    RunExport, WorkflowExport,
};
pub use temporal::generate_all_temporal_files;

use std::collections::BTreeMap;

use crate::lint::Target;

/// Generate the complete output file set for `target`.
///
/// Returns relative output path -> file content.
pub fn generate_all(target: Target, export: &AllExport) -> BTreeMap<String, String> {
    match target {
        Target::Temporal => generate_all_temporal_files(export),
        Target::Airflow => generate_all_airflow_files(export),
    }
}
