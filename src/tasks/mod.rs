// src/tasks/mod.rs

//! Task definitions.
//!
//! - [`invocation`] parses `name:arg,key=value` task invocations.
//! - [`registry`] maps task names to their parameter schema and body, and
//!   validates composite call graphs.
//! - [`builtin`] registers the provisioning tasks.

pub mod builtin;
pub mod invocation;
pub mod registry;

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::context::ExecutionContext;
use crate::errors::Result;
use crate::exec::Action;
use crate::exec::shell::quote_arg;

pub use builtin::builtin_registry;
pub use invocation::{Arg, Invocation};
pub use registry::TaskRegistry;

/// A named task parameter and the value used when the caller omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub default: &'static str,
}

impl Param {
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        Self { name, default }
    }
}

/// Renders the actions of a leaf task from its call.
pub type RenderFn = fn(&TaskCall<'_>) -> Result<Vec<Action>>;

/// What a task does when invoked.
#[derive(Debug, Clone)]
pub enum TaskBody {
    /// Leaf task: renders local/remote commands or file edits.
    Actions(RenderFn),

    /// Composite task: runs other tasks in order.
    Sequence(Sequence),
}

/// Body of a composite task.
#[derive(Debug, Clone)]
pub struct Sequence {
    /// How to configure the context before the steps run. `None` keeps the
    /// caller's context and does not enter a directory scope.
    pub setup: Option<ContextSetup>,

    pub steps: Vec<Step>,
}

/// Where a composite task takes the project name from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSetup {
    /// The value bound to this parameter of the composite task.
    FromParam(&'static str),

    /// `[project].name` from the settings; the placeholder token until the
    /// settings file has been rewritten by `update_fab`.
    FromSettings,
}

/// One entry of a composite task's ordered step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub task: &'static str,
    pub args: Vec<StepArg>,
}

impl Step {
    pub fn new(task: &'static str) -> Self {
        Self {
            task,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: StepArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Resolve step arguments against the current context into positional
    /// invocation arguments.
    pub fn resolve_args(&self, ctx: &ExecutionContext) -> Result<Vec<Arg>> {
        self.args
            .iter()
            .map(|arg| match arg {
                StepArg::Literal(value) => Ok(Arg::Positional(value.clone())),
                StepArg::ProjectName => Ok(Arg::Positional(ctx.project_name()?.to_string())),
            })
            .collect()
    }
}

/// A positional argument passed by a composite step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArg {
    Literal(String),
    ProjectName,
}

impl StepArg {
    pub fn literal(value: impl Into<String>) -> Self {
        StepArg::Literal(value.into())
    }
}

/// Parameter values after binding an invocation against a task's schema.
///
/// Every declared parameter has a value: the caller's or the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    values: BTreeMap<&'static str, String>,
}

impl BoundArgs {
    pub(crate) fn insert(&mut self, name: &'static str, value: String) {
        self.values.insert(name, value);
    }

    /// Value of a declared parameter; empty for names the task does not have.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Everything a leaf task can read while rendering.
#[derive(Debug, Clone, Copy)]
pub struct TaskCall<'a> {
    pub ctx: &'a ExecutionContext,
    pub args: &'a BoundArgs,
    pub settings: &'a Settings,
}

impl TaskCall<'_> {
    pub fn arg(&self, name: &str) -> &str {
        self.args.get(name)
    }

    /// Local shell command; unaffected by the context's directory scope.
    pub fn local(&self, command: impl Into<String>) -> Action {
        Action::Local {
            command: command.into(),
        }
    }

    /// Remote shell command, prefixed with `cd <dir> && ` while a directory
    /// scope is active. Connects as the context's user, or the configured
    /// target user when no composite task has set one.
    pub fn remote(&self, command: impl AsRef<str>) -> Action {
        let command = command.as_ref();
        let command = match self.ctx.working_directory() {
            Some(dir) => format!("cd {} && {}", quote_arg(dir), command),
            None => command.to_string(),
        };
        let user = self
            .ctx
            .remote_user
            .clone()
            .unwrap_or_else(|| self.settings.target.user.clone());

        Action::Remote { user, command }
    }
}
