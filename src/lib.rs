//! # Flowsmith
//!
//! Lint workflow DSL definitions and convert them into Temporal or
//! Airflow applications.
//!
//! Flowsmith parses Python files written against a small workflow DSL
//! (`@activity` functions, `@workflow` classes, structured
//! `Parameter(...)` defaults), validates them against a fixed rule set
//! per target backend, and generates ready-to-run boilerplate
//! applications from the extracted metadata. It never executes user
//! code and never talks to an orchestration server itself.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install flowsmith
//!
//! # Lint a DSL tree
//! flowsmith lint src/
//!
//! # Generate a Temporal application
//! flowsmith convert src/ -o temporal_output/
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::redundant_clone)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]

pub mod convert;
pub mod discovery;
pub mod error;
pub mod init;
pub mod lint;
pub mod loader;
pub mod meta;
pub mod parser;

// Re-export commonly used types
pub use convert::{extract_activity, extract_all, extract_workflow, generate_all};
pub use discovery::{discover_in_module, discover_tree, ActivityCandidate, WorkflowCandidate};
pub use error::{Error, Result};
pub use lint::{validate_activity, validate_workflow, Finding, Severity, Target};
pub use loader::{load_module, LoadedModule};
pub use meta::{ActivityMeta, ParamSpec, WorkflowMeta};
