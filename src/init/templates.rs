//! Project scaffolding templates.

/// Example activity module.
pub const GREET_ACTIVITY: &str = r#""""
Example activity.

Demonstrates how to define an activity with metadata.
"""

from typing import Any, Dict
from flowsmith_dsl import activity, Parameter


@activity(
    name="Greet User",
    description="Greets a user by name",
    category="Demo",
    icon="wave"
)
async def greet_user(
    name: str = Parameter(
        label="Name",
        description="Name of the user to greet",
        required=True
    ),
    greeting: str = Parameter(
        label="Greeting",
        description="The greeting to use",
        default="Hello"
    ),
    input_data=None
) -> Dict[str, Any]:
    """Greets a user with a personalized message."""
    message = greeting + ", " + name + "!"
    return {**(input_data or {}), "greeting": message}
"#;

/// Second example activity, scaffolded by the full template.
pub const HTTP_ACTIVITY: &str = r#""""
Example HTTP activity.
"""

from typing import Any, Dict
from flowsmith_dsl import activity, Parameter


@activity(
    name="Fetch URL",
    description="Fetches a URL and records the response status",
    category="Network",
    icon="http",
    tags=["http", "demo"]
)
async def fetch_url(
    url: str = Parameter(
        label="URL",
        description="The URL to fetch",
        required=True,
        validation=r"^https?://"
    ),
    input_data=None
) -> Dict[str, Any]:
    """Fetch a URL. Replace the body with a real HTTP client call."""
    return {**(input_data or {}), "fetched": url}
"#;

/// Example workflow module.
pub const HELLO_WORKFLOW: &str = r#""""
Example workflow.
"""

from typing import Any, Dict
from flowsmith_dsl import workflow


@workflow(
    name="Hello World",
    description="A simple hello world workflow",
    version="1.0.0"
)
class HelloWorldWorkflow:
    """A simple workflow that greets a user."""

    async def run(self, input_data: Dict[str, Any] = None) -> Dict[str, Any]:
        """Execute the workflow."""
        result = input_data or {}
        result["workflow"] = "completed"
        return result
"#;

/// pyproject.toml for the scaffolded project; `{name}` is substituted.
pub const PYPROJECT: &str = r#"[build-system]
requires = ["setuptools>=68", "wheel"]
build-backend = "setuptools.build_meta"

[project]
name = "{name}"
version = "0.1.0"
description = "A flowsmith workflow project"
requires-python = ">=3.9"
dependencies = [
    "flowsmith-dsl>=1.0.0",
    "temporalio>=1.4.0",
]

[project.optional-dependencies]
dev = [
    "pytest>=7.0.0",
    "pytest-asyncio>=0.21.0",
]

[tool.setuptools.packages.find]
where = ["."]
include = ["src*"]
"#;

/// Environment template.
pub const ENV_EXAMPLE: &str = r#"# Project Configuration

# Temporal Configuration
TEMPORAL_HOST=localhost:7233
TEMPORAL_NAMESPACE=default

# Add your environment variables here
"#;

/// .gitignore for the scaffolded project.
pub const GITIGNORE: &str = r#"# Python
__pycache__/
*.py[cod]
build/
dist/
*.egg-info/

# Virtual environments
.venv/
venv/

# IDE
.idea/
.vscode/
*.swp

# Environment
.env
.env.local

# Testing
.pytest_cache/
.coverage

# Generated output
temporal_output/
airflow_output/
"#;

/// README; `{name}` is substituted.
pub const README: &str = r#"# {name}

A flowsmith workflow project.

## Setup

1. Create a virtual environment:
   ```bash
   python -m venv .venv
   source .venv/bin/activate
   ```

2. Install dependencies:
   ```bash
   pip install -e ".[dev]"
   ```

## Development

```bash
# Lint your code
flowsmith lint src/

# Convert to a Temporal application
flowsmith convert src/ -o temporal_output/

# Run tests
pytest tests/
```

## Project Structure

```
{name}/
├── src/
│   ├── activities/      # Activities
│   └── workflows/       # Workflows
├── tests/               # Unit tests
├── pyproject.toml       # Project configuration
└── .env.example         # Environment template
```
"#;

/// Placeholder test module.
pub const PLACEHOLDER_TEST: &str = r#""""
Tests for the hello world workflow.
"""


def test_placeholder():
    """Placeholder test - replace with real tests."""
    assert True
"#;

/// Development docker-compose stub, scaffolded by the full template.
pub const COMPOSE_STUB: &str = r#"# Development stack stub
# Bring up a local Temporal server for the worker to connect to.

services:
  temporal:
    image: temporalio/auto-setup:latest
    ports:
      - "7233:7233"
"#;
