//! Activity metadata.

use serde::Serialize;

/// Metadata captured by the `@activity` decorator.
///
/// Attached to a function at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityMeta {
    /// Display name for the activity in the UI
    pub name: String,

    /// Help text describing what the activity does
    pub description: String,

    /// Category for grouping in the activity palette
    pub category: String,

    /// Icon identifier (e.g. "slack", "database", "code")
    pub icon: String,

    /// Tags for filtering and searching
    pub tags: Vec<String>,

    /// Name of the decorated function
    pub function_name: String,

    /// Whether the decorated function is `async def`
    pub is_async: bool,
}

impl ActivityMeta {
    /// Build metadata with decorator defaults for everything but the names.
    pub fn new(name: impl Into<String>, function_name: impl Into<String>, is_async: bool) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: "Custom".to_string(),
            icon: "code".to_string(),
            tags: Vec::new(),
            function_name: function_name.into(),
            is_async,
        }
    }
}
