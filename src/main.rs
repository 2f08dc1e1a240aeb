//! Flowsmith - lint and convert workflow DSL code.
//!
//! Parses Python files written against the workflow DSL, lints them
//! against a fixed rule set, and generates Temporal or Airflow
//! applications from the extracted metadata.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flowsmith::convert::{extract_all, generate_all};
use flowsmith::discovery::{
    discover_in_module, discover_tree, python_files, ActivityCandidate, WorkflowCandidate,
};
use flowsmith::init::{create_project, ProjectTemplate};
use flowsmith::lint::{
    format_discovery_summary, format_findings, validate_activity, validate_workflow, FileReport,
    Finding, LintReport, Target,
};
use flowsmith::loader::load_module;

/// Lint and convert workflow DSL code
#[derive(Parser)]
#[command(name = "flowsmith")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint DSL code for conformity with the target backend
    Lint {
        /// File or directory to lint
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Target platform for linting rules
        #[arg(short = 'T', long, value_enum, default_value_t = Target::Temporal)]
        target: Target,
    },

    /// Convert DSL code to a Temporal or Airflow application
    Convert {
        /// File or directory containing DSL code
        path: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Workflow name to convert (defaults to the first one found)
        #[arg(short, long)]
        name: Option<String>,

        /// Target platform to generate code for
        #[arg(short = 'T', long, value_enum, default_value_t = Target::Temporal)]
        target: Target,
    },

    /// Initialize a new workflow project
    Init {
        /// Name of the project to create
        name: String,

        /// Project template to use
        #[arg(short, long, value_enum, default_value_t = ProjectTemplate::Basic)]
        template: ProjectTemplate,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Display the flowsmith version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match cli.command {
        Commands::Lint { path, format, target } => {
            let passed = cmd_lint(&path, &format, target)?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Convert { path, output, name, target } => {
            let output = output.unwrap_or_else(|| PathBuf::from(format!("./{target}_output")));
            cmd_convert(&path, &output, name.as_deref(), target)?;
        }
        Commands::Init { name, template, output } => {
            cmd_init(&name, template, &output)?;
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
        }
        Commands::Version => {
            println!("flowsmith {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Lint one file: load failures become a single error finding.
fn lint_file(path: &Path, target: Target) -> FileReport {
    let file = path.display().to_string();

    let loaded = match load_module(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            return FileReport {
                file: file.clone(),
                activities_found: 0,
                workflows_found: 0,
                errors: vec![Finding::load_failure(file, e.to_string())],
            };
        }
    };

    let (activities, workflows) = discover_in_module(&loaded);
    let mut errors = Vec::new();
    for activity in &activities {
        errors.extend(validate_activity(activity, target));
    }
    for workflow in &workflows {
        errors.extend(validate_workflow(workflow, target));
    }

    FileReport {
        file,
        activities_found: activities.len(),
        workflows_found: workflows.len(),
        errors,
    }
}

/// Run the linter. Returns whether the run passed (no error findings).
fn cmd_lint(path: &Path, format: &str, target: Target) -> Result<bool> {
    let results: Vec<FileReport> = if path.is_file() {
        vec![lint_file(path, target)]
    } else if path.is_dir() {
        python_files(path)
            .iter()
            .map(|file| lint_file(file, target))
            .filter(FileReport::is_relevant)
            .collect()
    } else {
        bail!("{} is not a valid file or directory", path.display());
    };

    let report = LintReport::new(results);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.summary.passed);
    }

    println!("\nLint Results ({target})");
    println!("{}", "=".repeat(40));
    println!(
        "{}",
        format_discovery_summary(report.summary.total_activities, report.summary.total_workflows, 0)
    );

    if report.results.is_empty() {
        println!("\nNo workflow DSL components found.");
        return Ok(true);
    }

    for result in &report.results {
        if !result.errors.is_empty() {
            println!("{}", format_findings(&result.errors, Some(&result.file), false));
        }
    }

    println!("\n{}", "-".repeat(40));
    if report.summary.passed {
        println!("✓ All checks passed!");
    } else {
        println!(
            "✗ {} error(s), {} warning(s), {} info",
            report.summary.total_errors, report.summary.total_warnings, report.summary.total_info
        );
    }

    Ok(report.summary.passed)
}

/// Convert DSL code into an application for the target backend.
fn cmd_convert(path: &Path, output: &Path, name: Option<&str>, target: Target) -> Result<()> {
    println!("\nFlowsmith Convert ({target})");
    println!("{}", "=".repeat(40));
    println!("Source: {}", path.display());
    println!("Output: {}", output.display());
    println!();

    let (activities, mut workflows): (Vec<ActivityCandidate>, Vec<WorkflowCandidate>) =
        if path.is_file() {
            let loaded = load_module(path)?;
            discover_in_module(&loaded)
        } else if path.is_dir() {
            let result = discover_tree(path)?;
            if !result.failures.is_empty() {
                eprintln!("Warnings during discovery:");
                for (file, message) in &result.failures {
                    eprintln!("  - {}: {message}", file.display());
                }
                eprintln!();
            }
            (result.activities, result.workflows)
        } else {
            bail!("{} is not a valid file or directory", path.display());
        };

    println!("{}", format_discovery_summary(activities.len(), workflows.len(), 0));

    if workflows.is_empty() {
        return Err(flowsmith::Error::NoWorkflowFound.into());
    }
    if activities.is_empty() {
        eprintln!("Warning: no activities found; generated code will have empty implementations");
    }

    // Move the requested workflow to the front; generators use the first
    if let Some(wanted) = name {
        let index = workflows
            .iter()
            .position(|w| {
                w.meta
                    .as_ref()
                    .is_some_and(|m| m.name == wanted || m.class_name == wanted)
            })
            .with_context(|| format!("No workflow named '{wanted}' found"))?;
        workflows.rotate_left(index);
    }

    let export = extract_all(&activities, &workflows)?;
    let files = generate_all(target, &export);

    println!();
    for (rel, content) in &files {
        let dest = output.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, content)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        println!("  Created: {}", dest.display());
    }

    println!("\n✓ Generated {} file(s) in {}", files.len(), output.display());
    Ok(())
}

/// Scaffold a new project.
fn cmd_init(name: &str, template: ProjectTemplate, output: &Path) -> Result<()> {
    println!("Creating project: {name}");
    println!("Template: {template:?}");
    println!();

    let created = create_project(name, template, output)?;
    for file in &created {
        println!("  Created: {}", file.display());
    }

    println!("\n✓ Project created successfully!");
    println!("\nNext steps:");
    println!("  cd {name}");
    println!("  python -m venv .venv && source .venv/bin/activate");
    println!("  pip install -e \".[dev]\"");
    println!("  flowsmith lint src/");
    Ok(())
}

/// Generate shell completions to stdout.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
