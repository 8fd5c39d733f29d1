// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`action`] describes one unit of work a task renders: a local command,
//!   a remote command, or a local file edit.
//! - [`backend`] provides the `Backend` trait and the `SystemBackend` that
//!   actually runs actions; tests swap in a recording backend.
//! - [`local`] runs commands through `sh -c` on this machine.
//! - [`ssh`] runs commands on the VM through the `ssh` binary.
//! - [`edit`] performs the in-place file edits.
//! - [`shell`] has quoting helpers used when rendering commands.

pub mod action;
pub mod backend;
pub mod edit;
pub mod local;
pub mod shell;
pub mod ssh;

pub use action::Action;
pub use backend::{Backend, CollectingBackend, ExecOutcome, PlannedAction, SystemBackend};
