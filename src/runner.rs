// src/runner.rs

//! The fail-fast executor.
//!
//! A [`Runner`] interprets one task invocation at a time:
//! - leaf tasks render their actions and hand each one to the backend,
//!   waiting for it before issuing the next;
//! - composite tasks configure the execution context, enter the target
//!   directory scope, and run their step list in order.
//!
//! The first failure aborts everything that would have come after it. There
//! is no retry, rollback or cleanup; the directory scope is the only thing
//! restored on the way out.

use tracing::{debug, info};

use crate::config::Settings;
use crate::context::ExecutionContext;
use crate::errors::{FabError, Result};
use crate::exec::{Action, Backend, CollectingBackend, PlannedAction};
use crate::tasks::registry::{TaskRegistry, TaskSpec};
use crate::tasks::{BoundArgs, ContextSetup, Invocation, Sequence, TaskBody, TaskCall};

/// A task the runner started, with the context it saw at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub task: String,

    /// 0 for the invoked task, 1 for its steps, and so on.
    pub depth: usize,

    pub project_name: Option<String>,
    pub working_directory: Option<String>,
}

pub struct Runner<'a, B: Backend> {
    registry: &'a TaskRegistry,
    settings: &'a Settings,
    backend: B,
    history: Vec<TaskEntry>,
}

impl<'a, B: Backend> Runner<'a, B> {
    pub fn new(registry: &'a TaskRegistry, settings: &'a Settings, backend: B) -> Self {
        Self {
            registry,
            settings,
            backend,
            history: Vec::new(),
        }
    }

    /// Every task started so far, in start order.
    pub fn history(&self) -> &[TaskEntry] {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run one invocation to completion, or to its first failure.
    pub fn run(&mut self, ctx: &mut ExecutionContext, invocation: &Invocation) -> Result<()> {
        let registry = self.registry;
        let spec = registry.get(&invocation.task)?;
        let args = spec.bind(&invocation.args)?;

        info!("Executing task '{}'", invocation);
        self.run_task(ctx, spec, &args, 0)
    }

    fn run_task(
        &mut self,
        ctx: &mut ExecutionContext,
        spec: &'a TaskSpec,
        args: &BoundArgs,
        depth: usize,
    ) -> Result<()> {
        self.history.push(TaskEntry {
            task: spec.name.to_string(),
            depth,
            project_name: ctx.project_name.clone(),
            working_directory: ctx.working_directory().map(str::to_string),
        });

        match &spec.body {
            TaskBody::Actions(render) => {
                let actions = render(&TaskCall {
                    ctx: &*ctx,
                    args,
                    settings: self.settings,
                })?;

                for action in &actions {
                    self.execute(spec.name, action, ctx)?;
                }
                Ok(())
            }
            TaskBody::Sequence(seq) => match &seq.setup {
                Some(setup) => {
                    self.configure(ctx, setup, args);
                    let mut scoped = ctx.enter_dir(self.settings.target.path.clone());
                    self.run_steps(&mut scoped, seq, depth)
                }
                None => self.run_steps(ctx, seq, depth),
            },
        }
    }

    fn run_steps(
        &mut self,
        ctx: &mut ExecutionContext,
        seq: &'a Sequence,
        depth: usize,
    ) -> Result<()> {
        let registry = self.registry;
        for step in &seq.steps {
            let target = registry.get(step.task)?;
            let args = target.bind(&step.resolve_args(ctx)?)?;
            self.run_task(ctx, target, &args, depth + 1)?;
        }
        Ok(())
    }

    fn configure(&self, ctx: &mut ExecutionContext, setup: &ContextSetup, args: &BoundArgs) {
        let project_name = match setup {
            ContextSetup::FromParam(param) => args.get(param).to_string(),
            ContextSetup::FromSettings => self.settings.project.name.clone(),
        };

        ctx.remote_user = Some(self.settings.target.user.clone());
        ctx.project_name = Some(project_name);

        debug!(
            user = ?ctx.remote_user,
            project_name = ?ctx.project_name,
            "execution context configured"
        );
    }

    fn execute(&mut self, task: &str, action: &Action, ctx: &ExecutionContext) -> Result<()> {
        info!("{action}");

        let outcome = self.backend.execute(task, action, ctx)?;
        if outcome.is_success() {
            return Ok(());
        }

        Err(FabError::CommandFailed {
            task: task.to_string(),
            operation: action.operation(),
            command: action
                .command()
                .map(str::to_string)
                .unwrap_or_else(|| action.to_string()),
            exit_code: outcome.exit_code,
        })
    }
}

/// Flatten an invocation into the actions it would perform, without
/// performing any of them. `ctx` is left as the run would leave it.
pub fn plan(
    registry: &TaskRegistry,
    settings: &Settings,
    ctx: &mut ExecutionContext,
    invocation: &Invocation,
) -> Result<Vec<PlannedAction>> {
    let mut runner = Runner::new(registry, settings, CollectingBackend::default());
    runner.run(ctx, invocation)?;
    Ok(runner.into_backend().actions)
}
