use vagrantfab::context::ExecutionContext;
use vagrantfab::errors::Result;
use vagrantfab::exec::{Action, Backend, ExecOutcome};

/// One action as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub task: String,
    pub action: Action,
    pub project_name: Option<String>,
    pub working_directory: Option<String>,
}

/// A fake backend that:
/// - records every action with a snapshot of the execution context
/// - reports success, except for the action at `fail_at` (0-based), which
///   exits with code 1
///
/// Nothing is spawned and no file is touched.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub recorded: Vec<Recorded>,
    fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the action at this position in the run.
    pub fn failing_at(position: usize) -> Self {
        Self {
            recorded: Vec::new(),
            fail_at: Some(position),
        }
    }

    /// Tasks in the order their actions were issued.
    pub fn tasks(&self) -> Vec<&str> {
        self.recorded.iter().map(|r| r.task.as_str()).collect()
    }

    /// Shell commands in the order they were issued; file edits are skipped.
    pub fn commands(&self) -> Vec<&str> {
        self.recorded
            .iter()
            .filter_map(|r| r.action.command())
            .collect()
    }
}

impl Backend for RecordingBackend {
    fn execute(
        &mut self,
        task: &str,
        action: &Action,
        ctx: &ExecutionContext,
    ) -> Result<ExecOutcome> {
        let position = self.recorded.len();
        self.recorded.push(Recorded {
            task: task.to_string(),
            action: action.clone(),
            project_name: ctx.project_name.clone(),
            working_directory: ctx.working_directory().map(str::to_string),
        });

        if self.fail_at == Some(position) {
            return Ok(ExecOutcome::failed(1));
        }
        Ok(ExecOutcome::success())
    }
}
