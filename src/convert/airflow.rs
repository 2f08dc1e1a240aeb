//! Airflow DAG generator.
//!
//! Emits one top-level DAG definition plus one task-implementation
//! module per discovered activity. Disjoint from the Temporal file set;
//! the caller picks the target.

use std::collections::BTreeMap;

use super::{ActivityExport, AllExport, WorkflowExport};

const DEFAULT_DAG_ID: &str = "generated";

/// Generate `dag.py`.
pub fn generate_dag_file(workflow: &WorkflowExport, activities: &[ActivityExport]) -> String {
    let name = &workflow.name;
    let description = &workflow.description;
    let dag_id = &workflow.dag_id;

    let schedule = workflow
        .schedule
        .as_ref()
        .map_or_else(|| "None,  # Manual trigger only".to_string(), |s| format!("\"{s}\","));

    let task_imports: String = activities
        .iter()
        .map(|a| format!("from tasks.{name} import {name}\n", name = a.function_name))
        .collect();

    let task_defs: String = activities
        .iter()
        .map(|a| {
            format!(
                r#"
    {name}_task = PythonOperator(
        task_id="{name}",
        python_callable={name},
    )
"#,
                name = a.function_name
            )
        })
        .collect();

    let dependencies = if activities.len() > 1 {
        let chain: Vec<String> =
            activities.iter().map(|a| format!("{}_task", a.function_name)).collect();
        format!("    {}", chain.join(" >> "))
    } else {
        "    pass  # No dependencies defined".to_string()
    };

    format!(
        r#""""
{name}
{description}

Auto-generated Airflow DAG.
"""
from datetime import datetime, timedelta

from airflow import DAG
from airflow.operators.python import PythonOperator

# Import task functions
{task_imports}

# Default arguments for the DAG
default_args = {{
    "owner": "flowsmith",
    "depends_on_past": False,
    "email_on_failure": False,
    "email_on_retry": False,
    "retries": 1,
    "retry_delay": timedelta(minutes=5),
}}

# DAG definition
with DAG(
    dag_id="{dag_id}",
    default_args=default_args,
    description="{description}",
    schedule_interval={schedule}
    start_date=datetime(2024, 1, 1),
    catchup=False,
    tags=["flowsmith", "generated"],
) as dag:

    # Task definitions
{task_defs}
    # Task dependencies
{dependencies}
"#
    )
}

/// Generate `tasks/<function_name>.py` for one activity.
pub fn generate_task_file(activity: &ActivityExport) -> String {
    let function_name = &activity.function_name;
    let name = &activity.name;
    let description = &activity.description;

    let param_docs: String = activity
        .parameters
        .iter()
        .map(|p| {
            let help = p
                .spec
                .as_ref()
                .map(|s| s.description.as_str())
                .filter(|d| !d.is_empty())
                .unwrap_or("Task parameter");
            format!("        {}: {help}\n", p.name)
        })
        .collect();

    format!(
        r#""""
{name}

{description}
"""
import logging
from typing import Any, Dict, Optional

logger = logging.getLogger(__name__)


def {function_name}(input_data: Optional[Dict[str, Any]] = None, **kwargs) -> Dict[str, Any]:
    """
    {name}

    {description}

    Args:
{param_docs}        input_data: Input data from previous task (via XCom)
        **kwargs: Airflow context variables

    Returns:
        Dict containing the task output
    """
    # Pull input from XCom when not passed directly
    ti = kwargs.get("ti")
    if ti and not input_data:
        input_data = ti.xcom_pull(key="return_value") or {{}}

    input_data = input_data or {{}}

    logger.info("Executing {name}")
    logger.debug("Input data: %s", input_data)

    # TODO: Implement task logic here
    result = {{
        **input_data,
        "{function_name}_completed": True,
    }}

    logger.info("Task {name} completed")
    return result
"#
    )
}

/// Generate `requirements.txt` for the Airflow project.
pub fn generate_requirements() -> String {
    "# Flowsmith DSL\n\
     flowsmith-dsl>=1.0.0\n\
     \n\
     # Apache Airflow\n\
     apache-airflow>=2.7.0\n\
     \n\
     # Utilities\n\
     python-dotenv>=1.0.0\n"
        .to_string()
}

/// Generate `README.md` for the Airflow project.
pub fn generate_readme(workflow: &WorkflowExport, activities: &[ActivityExport]) -> String {
    let task_rows: String = activities
        .iter()
        .map(|a| format!("| `tasks/{}.py` | {} |\n", a.function_name, a.name))
        .collect();

    format!(
        r#"# {name}

{description}

## Layout

| File | Description |
|------|-------------|
| `dag.py` | DAG definition (id: `{dag_id}`) |
{task_rows}| `requirements.txt` | Python dependencies |

## Deploy

```bash
# Install dependencies
pip install -r requirements.txt

# Copy into your Airflow dags folder
cp -r . $AIRFLOW_HOME/dags/{dag_id}/
```

The DAG appears in the Airflow UI as `{dag_id}`.
"#,
        name = workflow.name,
        description = workflow.description,
        dag_id = workflow.dag_id,
    )
}

/// Generate the complete Airflow file set.
pub fn generate_all_airflow_files(export: &AllExport) -> BTreeMap<String, String> {
    let fallback;
    let workflow = match export.workflows.first() {
        Some(w) => w,
        None => {
            fallback = WorkflowExport {
                name: DEFAULT_DAG_ID.to_string(),
                description: String::new(),
                version: "1.0.0".to_string(),
                task_queue: DEFAULT_DAG_ID.to_string(),
                dag_id: DEFAULT_DAG_ID.to_string(),
                schedule: None,
                class_name: DEFAULT_DAG_ID.to_string(),
                docstring: None,
                run: None,
            };
            &fallback
        }
    };

    let mut files = BTreeMap::new();
    files.insert("dag.py".to_string(), generate_dag_file(workflow, &export.activities));
    files.insert("tasks/__init__.py".to_string(), "# Task implementations\n".to_string());
    for activity in &export.activities {
        files.insert(
            format!("tasks/{}.py", activity.function_name),
            generate_task_file(activity),
        );
    }
    files.insert("requirements.txt".to_string(), generate_requirements());
    files.insert("README.md".to_string(), generate_readme(workflow, &export.activities));
    files
}
