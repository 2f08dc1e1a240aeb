//! Workflow metadata.

use serde::Serialize;

/// Metadata captured by the `@workflow` decorator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowMeta {
    /// Display name for the workflow
    pub name: String,

    /// Help text describing what the workflow does
    pub description: String,

    /// Semantic version of the workflow definition
    pub version: String,

    /// Temporal task queue name (snake_case of `name` unless overridden)
    pub task_queue: String,

    /// Airflow DAG id (snake_case of `name` unless overridden)
    pub dag_id: String,

    /// Airflow schedule interval (e.g. "@daily", "0 0 * * *")
    pub schedule: Option<String>,

    /// Name of the decorated class
    pub class_name: String,
}

impl WorkflowMeta {
    /// Build metadata with decorator defaults; queue and DAG id derive
    /// from the display name unless explicitly overridden later.
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        let name = name.into();
        let derived = snake_case(&name);
        Self {
            name,
            description: String::new(),
            version: "1.0.0".to_string(),
            task_queue: derived.clone(),
            dag_id: derived,
            schedule: None,
            class_name: class_name.into(),
        }
    }
}

/// Lowercase a display name into an identifier: spaces and hyphens
/// become underscores.
pub fn snake_case(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Customer Onboarding"), "customer_onboarding");
        assert_eq!(snake_case("my-workflow"), "my_workflow");
        assert_eq!(snake_case("Simple"), "simple");
    }

    #[test]
    fn test_derived_identifiers() {
        let meta = WorkflowMeta::new("Hello World", "HelloWorldWorkflow");
        assert_eq!(meta.task_queue, "hello_world");
        assert_eq!(meta.dag_id, "hello_world");
        assert_eq!(meta.version, "1.0.0");
        assert!(meta.schedule.is_none());
    }
}
