//! Temporal application generator.
//!
//! Pure string templating from export records to a single-directory
//! worker application. Output matches the layout a Temporal Python
//! worker expects: workflow, activities, worker and starter modules
//! plus the packaging and container files around them.

use std::collections::BTreeMap;

use super::{ActivityExport, AllExport, WorkflowExport};

/// Fallbacks when converting a tree with no workflow metadata fields set.
const DEFAULT_CLASS: &str = "GeneratedWorkflow";
const DEFAULT_QUEUE: &str = "generated";

/// Generate `workflow.py`.
pub fn generate_workflow_file(workflow: &WorkflowExport) -> String {
    let class_name = &workflow.class_name;
    let task_queue = &workflow.task_queue;
    let name = &workflow.name;
    let description = &workflow.description;

    format!(
        r#""""
{name}
{description}

Auto-generated Temporal workflow with durable activity execution.
"""
import os
from datetime import timedelta
from typing import Any, Dict, Optional

from temporalio import workflow
from temporalio.common import RetryPolicy

with workflow.unsafe.imports_passed_through():
    from activities import ActivityInput


@workflow.defn
class {class_name}:
    """
    {description}

    Each activity is durable: if the worker crashes, Temporal resumes
    execution from the last completed activity.

    Task Queue: {task_queue}
    """

    @workflow.run
    async def run(self, input_data: Optional[Dict[str, Any]] = None) -> Dict[str, Any]:
        """Execute the workflow and return the final activity's result."""
        result = input_data or {{}}

        workflow.logger.info("Starting workflow with input: %s", result)

        # TODO: Add activity orchestration here
        # Example:
        # result = await workflow.execute_activity(
        #     my_activity,
        #     ActivityInput(...),
        #     start_to_close_timeout=timedelta(seconds=300),
        # )

        workflow.logger.info("Workflow completed with result: %s", result)
        return result
"#
    )
}

/// Generate `activities.py` with one stub per discovered activity.
pub fn generate_activities_file(activities: &[ActivityExport]) -> String {
    let stubs: String = activities.iter().map(activity_stub).collect();

    format!(
        r#""""
Activity implementations for the workflow.

Each activity is:
- Idempotent: safe to retry without side effects
- Durable: state is persisted by Temporal
- Configurable: retry policies and timeouts are set by the workflow
"""
import os
from typing import Any, Dict

from temporalio import activity

from flowsmith_dsl import ActivityInput


def get_env(key: str, default: str = "") -> str:
    """Get environment variable with optional default."""
    return os.environ.get(key, default)


# =============================================================================
# Activity Implementations
# =============================================================================
{stubs}"#
    )
}

fn activity_stub(export: &ActivityExport) -> String {
    let function_name = &export.function_name;
    let name = &export.name;
    let description = &export.description;

    format!(
        r#"
@activity.defn(name="{function_name}")
async def {function_name}(input: ActivityInput) -> Dict[str, Any]:
    """
    {name}

    {description}
    """
    params = input.parameters

    # TODO: Implement activity logic here
    activity.logger.info("[%s] Executing {name}", input.node_name)

    return input.input_data
"#
    )
}

/// Generate `worker.py`.
pub fn generate_worker_file(workflow: &WorkflowExport, activities: &[ActivityExport]) -> String {
    let class_name = &workflow.class_name;
    let task_queue = &workflow.task_queue;

    let names: Vec<&str> = activities.iter().map(|a| a.function_name.as_str()).collect();
    let imports = names.join(",\n    ");
    let listing = names.join(",\n            ");

    format!(
        r#""""
Worker for the {name} workflow.

Starts a Temporal Worker that listens to the task queue and executes
workflows and activities.
"""
import asyncio
import logging
import os
import sys

from temporalio.client import Client
from temporalio.worker import Worker

from workflow import {class_name}
from activities import (
    {imports}
)

logging.basicConfig(
    level=os.environ.get("LOG_LEVEL", "INFO").upper(),
    format="%(asctime)s - %(name)s - %(levelname)s - %(message)s",
)
logger = logging.getLogger("worker")

TEMPORAL_HOST = os.environ.get("TEMPORAL_HOST", "localhost:7233")
TEMPORAL_NAMESPACE = os.environ.get("TEMPORAL_NAMESPACE", "default")
TASK_QUEUE = "{task_queue}"


async def main():
    logger.info("Starting worker for task queue: %s", TASK_QUEUE)
    logger.info("Connecting to Temporal server at %s...", TEMPORAL_HOST)

    try:
        client = await Client.connect(TEMPORAL_HOST, namespace=TEMPORAL_NAMESPACE)
        logger.info("Connected to Temporal server")
    except Exception as e:
        logger.error("Failed to connect to Temporal server: %s", e)
        logger.error("Ensure Temporal server is running and reachable")
        sys.exit(1)

    worker = Worker(
        client,
        task_queue=TASK_QUEUE,
        workflows=[{class_name}],
        activities=[
            {listing}
        ],
    )

    logger.info("Worker started, waiting for tasks...")
    try:
        await worker.run()
    except asyncio.CancelledError:
        logger.info("Worker stopped")


if __name__ == "__main__":
    try:
        asyncio.run(main())
    except KeyboardInterrupt:
        logger.info("Interrupt received, shutting down")
"#,
        name = workflow.name,
    )
}

/// Generate `starter.py`.
pub fn generate_starter_file(workflow: &WorkflowExport) -> String {
    let name = &workflow.name;
    let class_name = &workflow.class_name;
    let task_queue = &workflow.task_queue;

    format!(
        r#""""
Start the {name} workflow.

Connects to Temporal and starts a workflow execution.
"""
import argparse
import asyncio
import json
import logging
import os
import sys
import uuid

from temporalio.client import Client

from workflow import {class_name}

TASK_QUEUE = "{task_queue}"

logging.basicConfig(
    level=logging.INFO,
    format="%(asctime)s - %(name)s - %(levelname)s - %(message)s",
)
logger = logging.getLogger(TASK_QUEUE)


async def start_workflow(input_data=None, wait_for_result=True, workflow_id=None):
    """Start one workflow execution, optionally waiting for its result."""
    temporal_host = os.environ.get("TEMPORAL_HOST", "localhost:7233")
    namespace = os.environ.get("TEMPORAL_NAMESPACE", "default")

    logger.info("=== Starting {name} ===")
    logger.info("Temporal Server: %s", temporal_host)
    logger.info("Namespace: %s", namespace)
    logger.info("Task Queue: %s", TASK_QUEUE)

    try:
        client = await Client.connect(temporal_host, namespace=namespace)
    except Exception as e:
        logger.error("Failed to connect to Temporal server: %s", e)
        sys.exit(1)

    if not workflow_id:
        workflow_id = TASK_QUEUE + "-" + uuid.uuid4().hex[:8]

    logger.info("Workflow ID: %s", workflow_id)

    handle = await client.start_workflow(
        {class_name}.run,
        id=workflow_id,
        task_queue=TASK_QUEUE,
        arg=input_data or {{}},
    )

    logger.info("Workflow started successfully!")

    if wait_for_result:
        logger.info("Waiting for workflow to complete...")
        result = await handle.result()
        logger.info("Workflow completed!")
        logger.info("Result: %s", json.dumps(result, indent=2, default=str))
        return result
    return {{"workflow_id": workflow_id, "status": "started"}}


async def main():
    parser = argparse.ArgumentParser(description="Start the {name} workflow")
    parser.add_argument("--input", "-i", type=str, default="{{}}", help="JSON input data")
    parser.add_argument("--id", type=str, default=None, help="Custom workflow ID")
    parser.add_argument("--no-wait", action="store_true", help="Start without waiting")

    args = parser.parse_args()

    try:
        input_data = json.loads(args.input)
    except json.JSONDecodeError as e:
        logger.error("Invalid JSON input: %s", e)
        sys.exit(1)

    await start_workflow(
        input_data=input_data,
        wait_for_result=not args.no_wait,
        workflow_id=args.id,
    )


if __name__ == "__main__":
    asyncio.run(main())
"#
    )
}

/// Generate `requirements.txt`.
pub fn generate_requirements() -> String {
    "# Flowsmith DSL\n\
     flowsmith-dsl>=1.0.0\n\
     \n\
     # Temporal SDK\n\
     temporalio>=1.4.0\n\
     \n\
     # Utilities\n\
     python-dotenv>=1.0.0\n"
        .to_string()
}

/// Generate `Dockerfile`.
pub fn generate_dockerfile(workflow: &WorkflowExport) -> String {
    format!(
        r#"# Dockerfile for {name}
# Generated by flowsmith

FROM python:3.11-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

ENV PYTHONUNBUFFERED=1
ENV TEMPORAL_HOST=temporal:7233
ENV TEMPORAL_NAMESPACE=default

CMD ["python", "worker.py"]
"#,
        name = workflow.name,
    )
}

/// Generate `docker-compose.yml`.
pub fn generate_docker_compose(workflow: &WorkflowExport) -> String {
    format!(
        r#"# Docker Compose for {name}
# Generated by flowsmith

services:
  worker:
    build: .
    restart: unless-stopped
    env_file:
      - .env
    environment:
      - TEMPORAL_HOST=${{TEMPORAL_HOST:-localhost:7233}}
      - TEMPORAL_NAMESPACE=${{TEMPORAL_NAMESPACE:-default}}
"#,
        name = workflow.name,
    )
}

/// Generate `.env.example`.
pub fn generate_env_example(workflow: &WorkflowExport) -> String {
    format!(
        r#"# {name} Configuration
# Generated by flowsmith

# Temporal Configuration
TEMPORAL_HOST=localhost:7233
TEMPORAL_NAMESPACE=default

# Task queue
# TASK_QUEUE={task_queue}
"#,
        name = workflow.name,
        task_queue = workflow.task_queue,
    )
}

/// Generate `README.md`.
pub fn generate_readme(workflow: &WorkflowExport) -> String {
    format!(
        r#"# {name}

{description}

## Quick Start

```bash
# Configure environment
cp .env.example .env

# Install dependencies
pip install -r requirements.txt

# Start Temporal (if not running)
temporal server start-dev

# Start the worker
python worker.py

# In another terminal, start a workflow
python starter.py
```

## Files

| File | Description |
|------|-------------|
| `workflow.py` | Main workflow definition |
| `activities.py` | Activity implementations |
| `worker.py` | Worker that executes workflows |
| `starter.py` | Script to start workflow executions |
| `requirements.txt` | Python dependencies |

## Task Queue

This workflow uses task queue: `{task_queue}`
"#,
        name = workflow.name,
        description = workflow.description,
        task_queue = workflow.task_queue,
    )
}

/// Generate the complete Temporal application file set.
pub fn generate_all_temporal_files(export: &AllExport) -> BTreeMap<String, String> {
    let fallback;
    let workflow = match export.workflows.first() {
        Some(w) => w,
        None => {
            fallback = WorkflowExport {
                name: DEFAULT_CLASS.to_string(),
                description: String::new(),
                version: "1.0.0".to_string(),
                task_queue: DEFAULT_QUEUE.to_string(),
                dag_id: DEFAULT_QUEUE.to_string(),
                schedule: None,
                class_name: DEFAULT_CLASS.to_string(),
                docstring: None,
                run: None,
            };
            &fallback
        }
    };

    let mut files = BTreeMap::new();
    files.insert("workflow.py".to_string(), generate_workflow_file(workflow));
    files.insert("activities.py".to_string(), generate_activities_file(&export.activities));
    files.insert("worker.py".to_string(), generate_worker_file(workflow, &export.activities));
    files.insert("starter.py".to_string(), generate_starter_file(workflow));
    files.insert("requirements.txt".to_string(), generate_requirements());
    files.insert("Dockerfile".to_string(), generate_dockerfile(workflow));
    files.insert("docker-compose.yml".to_string(), generate_docker_compose(workflow));
    files.insert(".env.example".to_string(), generate_env_example(workflow));
    files.insert("README.md".to_string(), generate_readme(workflow));
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workflow() -> WorkflowExport {
        WorkflowExport {
            name: "Customer Onboarding".to_string(),
            description: "Onboards new customers".to_string(),
            version: "1.2.0".to_string(),
            task_queue: "customer_onboarding".to_string(),
            dag_id: "customer_onboarding".to_string(),
            schedule: None,
            class_name: "CustomerOnboarding".to_string(),
            docstring: None,
            run: None,
        }
    }

    fn sample_activity(function_name: &str) -> ActivityExport {
        ActivityExport {
            name: format!("Activity {function_name}"),
            description: "Does a thing".to_string(),
            category: "Custom".to_string(),
            icon: "code".to_string(),
            tags: Vec::new(),
            function_name: function_name.to_string(),
            is_async: true,
            parameters: Vec::new(),
            docstring: None,
            return_type: Some("dict".to_string()),
        }
    }

    #[test]
    fn test_workflow_file_references_class_and_queue() {
        let content = generate_workflow_file(&sample_workflow());
        assert!(content.contains("class CustomerOnboarding:"));
        assert!(content.contains("Task Queue: customer_onboarding"));
        assert!(content.contains("@workflow.defn"));
    }

    #[test]
    fn test_activities_file_contains_stub_per_activity() {
        let activities = vec![sample_activity("send_email"), sample_activity("charge_card")];
        let content = generate_activities_file(&activities);
        assert!(content.contains("async def send_email(input: ActivityInput)"));
        assert!(content.contains("async def charge_card(input: ActivityInput)"));
        assert!(content.contains("@activity.defn(name=\"send_email\")"));
    }

    #[test]
    fn test_worker_file_imports_and_registers_activities() {
        let activities = vec![sample_activity("send_email")];
        let content = generate_worker_file(&sample_workflow(), &activities);
        assert!(content.contains("from workflow import CustomerOnboarding"));
        assert!(content.contains("send_email"));
        assert!(content.contains("TASK_QUEUE = \"customer_onboarding\""));
        assert!(content.contains("TEMPORAL_HOST"));
    }

    #[test]
    fn test_generate_all_emits_full_file_set() {
        let export =
            AllExport { activities: vec![sample_activity("a")], workflows: vec![sample_workflow()] };
        let files = generate_all_temporal_files(&export);
        for expected in [
            "workflow.py",
            "activities.py",
            "worker.py",
            "starter.py",
            "requirements.txt",
            "Dockerfile",
            "docker-compose.yml",
            ".env.example",
            "README.md",
        ] {
            assert!(files.contains_key(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_generate_all_without_workflow_uses_fallback() {
        let export = AllExport { activities: Vec::new(), workflows: Vec::new() };
        let files = generate_all_temporal_files(&export);
        assert!(files["workflow.py"].contains("class GeneratedWorkflow:"));
    }

    #[test]
    fn test_env_example_passes_through_connection_vars() {
        let content = generate_env_example(&sample_workflow());
        assert!(content.contains("TEMPORAL_HOST=localhost:7233"));
        assert!(content.contains("TEMPORAL_NAMESPACE=default"));
    }
}
