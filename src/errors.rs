// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FabError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Invalid task registry: {0}")]
    Registry(String),

    /// A task read a context field that no composite task has set yet.
    #[error("execution context is not configured: `{0}` is unset")]
    ContextNotConfigured(&'static str),

    /// The only runtime failure kind: an external command exited nonzero.
    #[error(
        "{operation}() encountered an error (return code {exit_code}) while executing '{command}' in task '{task}'"
    )]
    CommandFailed {
        task: String,
        operation: &'static str,
        command: String,
        exit_code: i32,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FabError>;
