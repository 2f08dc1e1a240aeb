//! Project scaffolding.
//!
//! Creates a new workflow project directory with example DSL code and
//! packaging files.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{Error, Result};

/// Which scaffolding variant to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProjectTemplate {
    /// One example activity and workflow
    #[default]
    Basic,
    /// Adds a second activity and a local dev stack stub
    Full,
}

/// Create a new project named `name` under `output_dir`.
///
/// Refuses to touch an existing directory. Returns the files created,
/// relative to the new project root, in creation order.
pub fn create_project(
    name: &str,
    template: ProjectTemplate,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let project_dir = output_dir.join(name);
    if project_dir.exists() {
        return Err(Error::OutputExists(project_dir));
    }

    for dir in ["src", "src/activities", "src/workflows", "tests"] {
        fs::create_dir_all(project_dir.join(dir))?;
    }

    let mut files: Vec<(PathBuf, String)> = vec![
        ("src/__init__.py".into(), "# src module\n".to_string()),
        ("src/activities/__init__.py".into(), "# activities module\n".to_string()),
        ("src/workflows/__init__.py".into(), "# workflows module\n".to_string()),
        ("src/activities/greet.py".into(), templates::GREET_ACTIVITY.to_string()),
        ("src/workflows/hello_world.py".into(), templates::HELLO_WORKFLOW.to_string()),
        ("pyproject.toml".into(), templates::PYPROJECT.replace("{name}", name)),
        (".env.example".into(), templates::ENV_EXAMPLE.to_string()),
        (".gitignore".into(), templates::GITIGNORE.to_string()),
        ("README.md".into(), templates::README.replace("{name}", name)),
        ("tests/test_hello_world.py".into(), templates::PLACEHOLDER_TEST.to_string()),
    ];

    if template == ProjectTemplate::Full {
        files.push(("src/activities/http.py".into(), templates::HTTP_ACTIVITY.to_string()));
        files.push(("docker-compose.yml".into(), templates::COMPOSE_STUB.to_string()));
    }

    let mut created = Vec::with_capacity(files.len());
    for (rel, content) in files {
        fs::write(project_dir.join(&rel), content)?;
        tracing::debug!(path = ?rel, "Created project file");
        created.push(rel);
    }

    Ok(created)
}
