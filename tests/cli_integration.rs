//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test.
fn flowsmith() -> Command {
    Command::cargo_bin("flowsmith").unwrap()
}

/// A module that lints clean under the Temporal rules.
const CLEAN_MODULE: &str = r#"
from flowsmith_dsl import activity, workflow, Parameter
from typing import Dict, Any


@activity(name="Fetch Data", category="Network")
async def fetch_data(input_data: Dict[str, Any]) -> Dict[str, Any]:
    """Fetch data from the upstream service."""
    return {"status": "ok"}


@workflow(name="Data Pipeline", task_queue="data-queue")
class DataPipeline:
    """Moves data from A to B."""

    async def run(self, input_data: Dict[str, Any]) -> Dict[str, Any]:
        return input_data
"#;

/// A workflow class with no run() method.
const BROKEN_WORKFLOW: &str = r#"
from flowsmith_dsl import workflow


@workflow(name="Stuck")
class Stuck:
    def helper(self):
        pass
"#;

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    flowsmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lint and convert workflow DSL code"));
}

#[test]
fn test_short_help_flag() {
    flowsmith().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    flowsmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_subcommand() {
    flowsmith()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flowsmith"));
}

#[test]
fn test_completions() {
    flowsmith()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flowsmith"));
}

// ============================================================================
// Lint Command Tests
// ============================================================================

#[test]
fn test_lint_command_help() {
    flowsmith()
        .args(["lint", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lint"));
}

#[test]
fn test_lint_clean_file_passes() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("pipeline.py");
    file.write_str(CLEAN_MODULE).unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn test_lint_reports_sync_activity() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("sync.py");
    file.write_str(
        r#"
from flowsmith_dsl import activity


@activity(name="Slow")
def slow(input_data):
    return input_data
"#,
    )
    .unwrap();

    // Sync activity is an error under Temporal rules
    flowsmith()
        .args(["lint", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("activity-must-be-async"));
}

#[test]
fn test_lint_sync_activity_allowed_for_airflow() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("sync.py");
    file.write_str(
        r#"
from flowsmith_dsl import activity
from typing import Dict, Any


@activity(name="Slow")
def slow(input_data: Dict[str, Any], **kwargs) -> Dict[str, Any]:
    return input_data
"#,
    )
    .unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap(), "--target", "airflow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn test_lint_workflow_without_run_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("stuck.py");
    file.write_str(BROKEN_WORKFLOW).unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("workflow-missing-run-method"));
}

#[test]
fn test_lint_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/good.py").write_str(CLEAN_MODULE).unwrap();
    temp.child("src/bad.py").write_str(BROKEN_WORKFLOW).unwrap();

    flowsmith()
        .args(["lint", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("workflow-missing-run-method"));
}

#[test]
fn test_lint_json_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("pipeline.py");
    file.write_str(CLEAN_MODULE).unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"summary\""))
        .stdout(predicate::str::contains("\"passed\": true"));
}

#[test]
fn test_lint_json_failure_shape() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("stuck.py");
    file.write_str(BROKEN_WORKFLOW).unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap(), "--format", "json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"rule_id\": \"workflow-missing-run-method\""))
        .stdout(predicate::str::contains("\"passed\": false"));
}

#[test]
fn test_lint_missing_path() {
    flowsmith()
        .args(["lint", "/no/such/path"])
        .assert()
        .failure();
}

#[test]
fn test_lint_unparseable_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("bad.py");
    file.write_str("def broken(:\n    pass\n").unwrap();

    flowsmith()
        .args(["lint", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("module-load-failed"));
}

// ============================================================================
// Convert Command Tests
// ============================================================================

#[test]
fn test_convert_command_help() {
    flowsmith()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert"));
}

#[test]
fn test_convert_temporal() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/activities.py")
        .write_str(
            r#"
from flowsmith_dsl import activity
from typing import Dict, Any


@activity(name="Fetch Data")
async def fetch_data(input_data: Dict[str, Any]) -> Dict[str, Any]:
    return input_data
"#,
        )
        .unwrap();
    temp.child("src/flow.py")
        .write_str(
            r#"
from flowsmith_dsl import workflow
from typing import Dict, Any


@workflow(name="Data Pipeline", task_queue="data-queue")
class DataPipeline:
    async def run(self, input_data: Dict[str, Any]) -> Dict[str, Any]:
        return input_data
"#,
        )
        .unwrap();

    let out = temp.child("out");
    flowsmith()
        .args([
            "convert",
            temp.child("src").path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    out.child("workflow.py").assert(predicate::str::contains("class DataPipeline"));
    out.child("activities.py").assert(predicate::str::contains("async def fetch_data"));
    out.child("worker.py").assert(predicate::str::contains("data-queue"));
    out.child("requirements.txt").assert(predicate::str::contains("temporalio"));
    out.child("docker-compose.yml").assert(predicate::path::exists());
}

#[test]
fn test_convert_airflow() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("pipeline.py");
    file.write_str(CLEAN_MODULE).unwrap();

    let out = temp.child("airflow_out");
    flowsmith()
        .args([
            "convert",
            file.path().to_str().unwrap(),
            "--target",
            "airflow",
            "--output",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    out.child("dag.py").assert(predicate::str::contains("PythonOperator"));
    out.child("tasks/fetch_data.py")
        .assert(predicate::str::contains("def fetch_data"))
        .assert(predicate::str::contains("input_data"))
        .assert(predicate::str::contains("**kwargs"));
    out.child("requirements.txt").assert(predicate::str::contains("apache-airflow"));
}

#[test]
fn test_convert_without_workflow_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("only_activity.py");
    file.write_str(
        r#"
from flowsmith_dsl import activity


@activity(name="Lonely")
async def lonely(input_data):
    return input_data
"#,
    )
    .unwrap();

    let out = temp.child("out");
    flowsmith()
        .args([
            "convert",
            file.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No workflows found"));
}

#[test]
fn test_convert_selects_named_workflow() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("multi.py");
    file.write_str(
        r#"
from flowsmith_dsl import workflow


@workflow(name="First")
class First:
    async def run(self, input_data):
        return input_data


@workflow(name="Second")
class Second:
    async def run(self, input_data):
        return input_data
"#,
    )
    .unwrap();

    let out = temp.child("out");
    flowsmith()
        .args([
            "convert",
            file.path().to_str().unwrap(),
            "--name",
            "Second",
            "--output",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    out.child("workflow.py").assert(predicate::str::contains("class Second"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_command_help() {
    flowsmith()
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"));
}

#[test]
fn test_init_basic_project() {
    let temp = assert_fs::TempDir::new().unwrap();

    flowsmith()
        .args(["init", "myflow", "--output", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created successfully"));

    temp.child("myflow/pyproject.toml").assert(predicate::str::contains("myflow"));
    temp.child("myflow/src/activities/greet.py")
        .assert(predicate::str::contains("@activity"));
    temp.child("myflow/src/workflows/hello_world.py")
        .assert(predicate::str::contains("@workflow"));
}

#[test]
fn test_init_full_template() {
    let temp = assert_fs::TempDir::new().unwrap();

    flowsmith()
        .args([
            "init",
            "myflow",
            "--template",
            "full",
            "--output",
            temp.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    temp.child("myflow/src/activities/http.py").assert(predicate::path::exists());
    temp.child("myflow/docker-compose.yml").assert(predicate::path::exists());
}

#[test]
fn test_init_refuses_existing_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("myflow/keep.txt").write_str("keep").unwrap();

    flowsmith()
        .args(["init", "myflow", "--output", temp.path().to_str().unwrap()])
        .assert()
        .failure();

    temp.child("myflow/keep.txt").assert("keep");
}

#[test]
fn test_init_generated_project_lints_clean() {
    let temp = assert_fs::TempDir::new().unwrap();

    flowsmith()
        .args(["init", "myflow", "--output", temp.path().to_str().unwrap()])
        .assert()
        .success();

    flowsmith()
        .args(["lint", temp.child("myflow/src").path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}
