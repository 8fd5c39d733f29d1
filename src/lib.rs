// src/lib.rs

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod runner;
pub mod tasks;

use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{Settings, load_or_default, validate_settings};
use crate::context::ExecutionContext;
use crate::errors::{FabError, Result};
use crate::exec::{CollectingBackend, SystemBackend};
use crate::runner::Runner;
use crate::tasks::registry::TaskSpec;
use crate::tasks::{Invocation, TaskBody, TaskRegistry, builtin_registry};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading and CLI overrides
/// - the task registry
/// - invocation parsing (all of it, before anything runs)
/// - the runner, with the system backend or a collecting one for `--dry-run`
pub fn run(args: CliArgs) -> Result<()> {
    let mut settings = load_or_default(args.config.as_deref().map(Path::new))?;
    apply_overrides(&mut settings, &args);
    validate_settings(&settings)?;

    let registry = builtin_registry();
    registry.validate()?;

    if args.list {
        print_task_list(&registry);
        return Ok(());
    }

    if let Some(name) = &args.display {
        print_task_details(registry.get(name)?);
        return Ok(());
    }

    let invocations = parse_invocations(&registry, &args.tasks)?;

    let mut ctx = ExecutionContext::new();
    ctx.project_name = args.project.clone();

    if args.dry_run {
        return print_dry_run(&registry, &settings, &mut ctx, &invocations);
    }

    let mut runner = Runner::new(&registry, &settings, SystemBackend::from_settings(&settings));
    for invocation in &invocations {
        runner.run(&mut ctx, invocation)?;
    }

    println!("\nDone.");
    Ok(())
}

/// Parse every task argument and check it binds against its task, so a typo
/// in the last task is reported before the first one runs.
pub fn parse_invocations(registry: &TaskRegistry, raw: &[String]) -> Result<Vec<Invocation>> {
    if raw.is_empty() {
        return Err(FabError::InvalidInvocation(
            "no tasks given (use --list to see available tasks)".to_string(),
        ));
    }

    raw.iter()
        .map(|s| -> Result<Invocation> {
            let invocation: Invocation = s.parse()?;
            registry.get(&invocation.task)?.bind(&invocation.args)?;
            Ok(invocation)
        })
        .collect()
}

fn apply_overrides(settings: &mut Settings, args: &CliArgs) {
    if let Some(host) = &args.host {
        settings.target.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.target.port = port;
    }
    if let Some(identity) = &args.identity {
        settings.target.identity_file = Some(identity.clone());
    }
    debug!(settings = ?settings.target, "effective target settings");
}

/// `--list` output: every task with its one-line description.
fn print_task_list(registry: &TaskRegistry) {
    println!("Available commands:\n");
    let width = registry.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for spec in registry.iter() {
        println!("    {:width$}  {}", spec.name, spec.doc);
    }
}

/// `--display` output: description, parameters and, for composites, steps.
fn print_task_details(spec: &TaskSpec) {
    println!("Displaying detailed information for task '{}':\n", spec.name);
    println!("    {}\n", spec.doc);

    if spec.params.is_empty() {
        println!("    Arguments: none");
    } else {
        let params: Vec<String> = spec
            .params
            .iter()
            .map(|p| format!("{}={:?}", p.name, p.default))
            .collect();
        println!("    Arguments: {}", params.join(", "));
    }

    if let TaskBody::Sequence(seq) = &spec.body {
        let steps: Vec<&str> = seq.steps.iter().map(|s| s.task).collect();
        println!("    Steps: {}", steps.join(" -> "));
    }
}

/// `--dry-run` output: the actions each invocation would perform.
fn print_dry_run(
    registry: &TaskRegistry,
    settings: &Settings,
    ctx: &mut ExecutionContext,
    invocations: &[Invocation],
) -> Result<()> {
    println!("vagrantfab dry-run");
    println!(
        "  target = {}@{}:{} in {}",
        settings.target.user, settings.target.host, settings.target.port, settings.target.path
    );
    if settings.project.is_placeholder() {
        println!("  project.name is still the placeholder (run update_fab)");
    }
    println!();

    let mut runner = Runner::new(registry, settings, CollectingBackend::default());
    for invocation in invocations {
        runner.run(ctx, invocation)?;
    }

    for planned in &runner.backend().actions {
        println!("  {:<18} {}", planned.task, planned.action);
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
