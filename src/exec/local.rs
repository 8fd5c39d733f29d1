// src/exec/local.rs

use std::process::Command;

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;
use crate::exec::ExecOutcome;

/// Run a shell command on this machine and wait for it.
///
/// Standard streams are inherited, so the command's output goes straight to
/// the user's terminal.
pub fn exec_local(command: &str) -> Result<ExecOutcome> {
    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    let status = cmd
        .status()
        .with_context(|| format!("spawning local shell for '{command}'"))?;

    let code = status.code().unwrap_or(-1);
    debug!(exit_code = code, "local command exited");

    Ok(ExecOutcome { exit_code: code })
}
