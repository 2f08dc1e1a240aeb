//! Structured parameter descriptors.

use serde::Serialize;

use crate::parser::PyLiteral;

/// UI-facing metadata for an activity parameter, written in the DSL as
/// a `Parameter(...)` default value.
///
/// `required=False` with no default is legal (the value is supplied at
/// call time); `required=True` with a non-null default is permitted but
/// semantically redundant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Display label in the UI
    pub label: String,

    /// Help text shown in the UI
    pub description: String,

    /// Whether this parameter must be provided
    pub required: bool,

    /// Default value if not specified
    pub default: Option<PyLiteral>,

    /// Allow templating in the value
    pub template: bool,

    /// Mask the value in the UI (passwords, API keys)
    pub secret: bool,

    /// Allowed values for dropdown selection
    pub options: Option<Vec<PyLiteral>>,

    /// Regex pattern for value validation
    pub validation: Option<String>,
}

impl Default for ParamSpec {
    fn default() -> Self {
        Self {
            label: String::new(),
            description: String::new(),
            required: false,
            default: None,
            template: false,
            secret: false,
            options: None,
            validation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_dsl() {
        let spec = ParamSpec::default();
        assert!(!spec.required);
        assert!(!spec.template);
        assert!(!spec.secret);
        assert!(spec.default.is_none());
        assert!(spec.options.is_none());
        assert!(spec.validation.is_none());
    }

    #[test]
    fn test_required_with_default_is_legal() {
        let spec = ParamSpec {
            label: "Greeting".to_string(),
            required: true,
            default: Some(PyLiteral::Str("Hello".into())),
            ..ParamSpec::default()
        };
        assert!(spec.required);
        assert_eq!(spec.default.unwrap().as_str(), Some("Hello"));
    }
}
