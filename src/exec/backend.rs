// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runner hands every rendered [`Action`] to a `Backend` instead of
//! spawning processes itself. This makes it easy to swap in a recording
//! backend in tests (see the `vagrantfab-test-utils` crate) or a collecting
//! one for `--dry-run`, while production uses [`SystemBackend`].

use crate::config::Settings;
use crate::context::ExecutionContext;
use crate::errors::Result;
use crate::exec::ssh::SshTarget;
use crate::exec::{Action, edit, local};

/// Exit status of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Process exit code; -1 when the process was killed by a signal.
    pub exit_code: i32,
}

impl ExecOutcome {
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    pub fn failed(exit_code: i32) -> Self {
        Self { exit_code }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting how rendered actions are carried out.
///
/// Calls are strictly sequential: the runner waits for each one before
/// issuing the next. A nonzero [`ExecOutcome`] is turned into a
/// `CommandFailed` error by the runner; `Err` is for failures to even start.
pub trait Backend {
    fn execute(
        &mut self,
        task: &str,
        action: &Action,
        ctx: &ExecutionContext,
    ) -> Result<ExecOutcome>;
}

/// Production backend: `sh -c` locally, `ssh` for the VM, `std::fs` edits.
#[derive(Debug, Clone)]
pub struct SystemBackend {
    ssh: SshTarget,
}

impl SystemBackend {
    pub fn new(ssh: SshTarget) -> Self {
        Self { ssh }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(SshTarget::from_settings(&settings.target))
    }
}

impl Backend for SystemBackend {
    fn execute(
        &mut self,
        _task: &str,
        action: &Action,
        _ctx: &ExecutionContext,
    ) -> Result<ExecOutcome> {
        match action {
            Action::Local { command } => local::exec_local(command),
            Action::Remote { user, command } => self.ssh.exec(user, command),
            Action::AppendLines { path, lines } => {
                edit::append_lines(path, lines)?;
                Ok(ExecOutcome::success())
            }
            Action::ReplaceToken {
                path,
                token,
                value,
                seed,
            } => {
                if let Some(seed) = seed {
                    edit::seed_if_missing(path, seed)?;
                }
                edit::replace_token(path, token, value)?;
                Ok(ExecOutcome::success())
            }
        }
    }
}

/// An action together with the task that rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub task: String,
    pub action: Action,
}

/// Backend that runs nothing and keeps every action it is handed.
///
/// Used for `--dry-run` and for planning.
#[derive(Debug, Clone, Default)]
pub struct CollectingBackend {
    pub actions: Vec<PlannedAction>,
}

impl Backend for CollectingBackend {
    fn execute(
        &mut self,
        task: &str,
        action: &Action,
        _ctx: &ExecutionContext,
    ) -> Result<ExecOutcome> {
        self.actions.push(PlannedAction {
            task: task.to_string(),
            action: action.clone(),
        });
        Ok(ExecOutcome::success())
    }
}
