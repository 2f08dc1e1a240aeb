//! Metadata records attached to DSL-decorated functions and classes.
//!
//! These are the immutable records the `@activity` and `@workflow`
//! decorators carry; discovery builds them once per load and the
//! validator, extractor and generators only ever read them.

mod activity;
mod parameter;
mod workflow;

pub use activity::ActivityMeta;
pub use parameter::ParamSpec;
pub use workflow::{snake_case, WorkflowMeta};
