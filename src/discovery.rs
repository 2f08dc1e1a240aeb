//! Discovery of decorated activities and workflows.
//!
//! Scans a loaded module's members and keeps the ones carrying DSL
//! decorator metadata; the bulk variant walks a directory tree and
//! tolerates individual files failing to load.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::loader::{load_module, LoadedModule};
use crate::meta::{snake_case, ActivityMeta, WorkflowMeta};
use crate::parser::{parse_literal, ClassDef, Decorator, FunctionDef};

/// A function that may carry `@activity` metadata.
#[derive(Debug, Clone)]
pub struct ActivityCandidate {
    pub def: FunctionDef,
    pub meta: Option<ActivityMeta>,
}

impl ActivityCandidate {
    /// Build a candidate, capturing decorator metadata when present.
    pub fn from_function(def: FunctionDef) -> Self {
        let meta = def.decorator("activity").map(|dec| activity_meta(dec, &def));
        Self { def, meta }
    }
}

/// A class that may carry `@workflow` metadata.
#[derive(Debug, Clone)]
pub struct WorkflowCandidate {
    pub def: ClassDef,
    pub meta: Option<WorkflowMeta>,
}

impl WorkflowCandidate {
    /// Build a candidate, capturing decorator metadata when present.
    pub fn from_class(def: ClassDef) -> Self {
        let meta = def.decorator("workflow").map(|dec| workflow_meta(dec, &def));
        Self { def, meta }
    }
}

/// Result of a recursive directory scan.
#[derive(Debug, Default)]
pub struct DiscoveryResult {
    pub activities: Vec<ActivityCandidate>,
    pub workflows: Vec<WorkflowCandidate>,

    /// Files that failed to load, with the load error message.
    pub failures: Vec<(PathBuf, String)>,
}

/// Find all `@activity` functions and `@workflow` classes in a module.
///
/// Member order follows the parsed module; callers should treat it as
/// unordered beyond set membership.
pub fn discover_in_module(
    loaded: &LoadedModule,
) -> (Vec<ActivityCandidate>, Vec<WorkflowCandidate>) {
    let activities: Vec<_> = loaded
        .module
        .functions
        .iter()
        .filter(|f| f.decorator("activity").is_some())
        .map(|f| ActivityCandidate::from_function(f.clone()))
        .collect();

    let workflows: Vec<_> = loaded
        .module
        .classes
        .iter()
        .filter(|c| c.decorator("workflow").is_some())
        .map(|c| WorkflowCandidate::from_class(c.clone()))
        .collect();

    (activities, workflows)
}

/// Whether a directory entry should be skipped during a tree scan.
fn should_skip(path: &Path) -> bool {
    path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name == "__pycache__" || (name.starts_with('.') && name.len() > 1 && name != "..")
    })
}

/// All Python files under `directory`, sorted, skipping cache
/// directories and hidden files.
pub fn python_files(directory: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("py"))
        .filter(|p| p.strip_prefix(directory).is_ok_and(|rel| !should_skip(rel)))
        .collect();
    files.sort();
    files
}

/// Discover every activity and workflow under `directory`, recursively.
///
/// A single bad file is recorded as a failure and never aborts the scan
/// of the rest of the tree.
pub fn discover_tree(directory: &Path) -> Result<DiscoveryResult> {
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let mut result = DiscoveryResult::default();

    for file in python_files(directory) {
        match load_module(&file) {
            Ok(loaded) => {
                let (activities, workflows) = discover_in_module(&loaded);
                if !activities.is_empty() || !workflows.is_empty() {
                    tracing::debug!(
                        path = ?file,
                        activities = activities.len(),
                        workflows = workflows.len(),
                        "Discovered components"
                    );
                }
                result.activities.extend(activities);
                result.workflows.extend(workflows);
            }
            Err(e) => {
                tracing::warn!(path = ?file, error = %e, "Failed to load module");
                result.failures.push((file, e.to_string()));
            }
        }
    }

    Ok(result)
}

/// Build activity metadata from an `@activity(...)` decorator.
fn activity_meta(dec: &Decorator, def: &FunctionDef) -> ActivityMeta {
    let name = dec
        .kwarg_str("name")
        .or_else(|| dec.positional(0).and_then(crate::parser::parse_py_string))
        .unwrap_or_else(|| def.name.clone());

    let mut meta = ActivityMeta::new(name, def.name.clone(), def.is_async);

    if let Some(description) = dec.kwarg_str("description") {
        meta.description = description;
    }
    if let Some(category) = dec.kwarg_str("category") {
        meta.category = category;
    }
    if let Some(icon) = dec.kwarg_str("icon") {
        meta.icon = icon;
    }
    if let Some(tags) = dec.kwarg("tags").and_then(parse_literal) {
        if let Some(items) = tags.as_list() {
            meta.tags = items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect();
        }
    }

    meta
}

/// Build workflow metadata from a `@workflow(...)` decorator.
fn workflow_meta(dec: &Decorator, def: &ClassDef) -> WorkflowMeta {
    let name = dec
        .kwarg_str("name")
        .or_else(|| dec.positional(0).and_then(crate::parser::parse_py_string))
        .unwrap_or_else(|| def.name.clone());

    let mut meta = WorkflowMeta::new(name.clone(), def.name.clone());

    if let Some(description) = dec.kwarg_str("description") {
        meta.description = description;
    }
    if let Some(version) = dec.kwarg_str("version") {
        meta.version = version;
    }
    if let Some(task_queue) = dec.kwarg_str("task_queue") {
        meta.task_queue = task_queue;
    } else {
        meta.task_queue = snake_case(&name);
    }
    if let Some(dag_id) = dec.kwarg_str("dag_id") {
        meta.dag_id = dag_id;
    }
    if let Some(schedule) = dec.kwarg_str("schedule") {
        meta.schedule = Some(schedule);
    }

    meta
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn load_source(dir: &TempDir, name: &str, source: &str) -> LoadedModule {
        let path = dir.path().join(name);
        fs::write(&path, source).unwrap();
        load_module(&path).unwrap()
    }

    const MIXED: &str = r#"
@activity(name="A One")
async def a_one(input_data=None) -> dict:
    return {}

@activity(name="A Two", category="Net", icon="http", tags=["net"])
def a_two(input_data=None):
    return {}

def undecorated():
    pass

@workflow(name="Flow", version="2.0.0", schedule="@daily")
class Flow:
    async def run(self, input_data=None):
        return {}

class PlainClass:
    pass
"#;

    #[test]
    fn test_discover_filters_undecorated_members() {
        let dir = TempDir::new().unwrap();
        let loaded = load_source(&dir, "mixed.py", MIXED);
        let (activities, workflows) = discover_in_module(&loaded);

        assert_eq!(activities.len(), 2);
        assert_eq!(workflows.len(), 1);

        let names: Vec<_> = activities
            .iter()
            .map(|a| a.meta.as_ref().unwrap().function_name.clone())
            .collect();
        assert!(names.contains(&"a_one".to_string()));
        assert!(names.contains(&"a_two".to_string()));
        assert!(!names.contains(&"undecorated".to_string()));
    }

    #[test]
    fn test_decorator_metadata_captured() {
        let dir = TempDir::new().unwrap();
        let loaded = load_source(&dir, "mixed.py", MIXED);
        let (activities, workflows) = discover_in_module(&loaded);

        let a_two = activities
            .iter()
            .find(|a| a.def.name == "a_two")
            .and_then(|a| a.meta.as_ref())
            .unwrap();
        assert_eq!(a_two.category, "Net");
        assert_eq!(a_two.icon, "http");
        assert_eq!(a_two.tags, vec!["net"]);
        assert!(!a_two.is_async);

        let flow = workflows[0].meta.as_ref().unwrap();
        assert_eq!(flow.version, "2.0.0");
        assert_eq!(flow.task_queue, "flow");
        assert_eq!(flow.dag_id, "flow");
        assert_eq!(flow.schedule.as_deref(), Some("@daily"));
        assert_eq!(flow.class_name, "Flow");
    }

    #[test]
    fn test_tree_scan_tolerates_bad_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("good_a.py"),
            "@activity(name=\"A\")\nasync def a(input_data=None) -> dict:\n    return {}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("good_b.py"),
            "@workflow(name=\"B\")\nclass B:\n    async def run(self, input_data=None):\n        return {}\n",
        )
        .unwrap();
        fs::write(dir.path().join("broken.py"), "def broken(\n").unwrap();

        let result = discover_tree(dir.path()).unwrap();
        assert_eq!(result.activities.len(), 1);
        assert_eq!(result.workflows.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].0.ends_with("broken.py"));
    }

    #[test]
    fn test_tree_scan_skips_pycache_and_hidden() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("__pycache__");
        fs::create_dir(&cache).unwrap();
        fs::write(cache.join("cached.py"), "def broken(\n").unwrap();
        fs::write(dir.path().join(".hidden.py"), "def broken(\n").unwrap();
        fs::write(
            dir.path().join("real.py"),
            "@activity(name=\"A\")\nasync def a(input_data=None) -> dict:\n    return {}\n",
        )
        .unwrap();

        let result = discover_tree(dir.path()).unwrap();
        assert_eq!(result.activities.len(), 1);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_tree_scan_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n").unwrap();
        assert!(matches!(
            discover_tree(&file),
            Err(Error::NotADirectory(_))
        ));
    }
}
