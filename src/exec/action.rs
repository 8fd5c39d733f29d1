// src/exec/action.rs

use std::fmt;
use std::path::PathBuf;

/// One unit of work rendered by a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shell command on this machine.
    Local { command: String },

    /// Shell command on the VM, already prefixed with any `cd` scope.
    Remote { user: String, command: String },

    /// Append lines to a local file, adding a missing final newline first.
    AppendLines { path: PathBuf, lines: Vec<String> },

    /// Replace every occurrence of `token` in a local file with `value`.
    /// A missing file is first created with `seed` when one is given.
    ReplaceToken {
        path: PathBuf,
        token: String,
        value: String,
        seed: Option<String>,
    },
}

impl Action {
    /// Fabric-style operation name used in logs and failure reports.
    pub fn operation(&self) -> &'static str {
        match self {
            Action::Local { .. } => "local",
            Action::Remote { .. } => "run",
            Action::AppendLines { .. } => "append",
            Action::ReplaceToken { .. } => "sed",
        }
    }

    /// The shell command, for command actions.
    pub fn command(&self) -> Option<&str> {
        match self {
            Action::Local { command } | Action::Remote { command, .. } => Some(command),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Local { command } => write!(f, "[localhost] local: {command}"),
            Action::Remote { user, command } => write!(f, "[{user}] run: {command}"),
            Action::AppendLines { path, lines } => {
                write!(f, "[localhost] append: {} << {}", path.display(), lines.join(", "))
            }
            Action::ReplaceToken { path, token, value, .. } => {
                write!(f, "[localhost] sed: {} s/{token}/{value}/", path.display())
            }
        }
    }
}
