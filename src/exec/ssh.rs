// src/exec/ssh.rs

//! Remote execution on the VM through the `ssh` binary.
//!
//! No libssh dependency: the command is handed to `ssh` as its remote
//! command argument and the remote login shell runs it.

use std::process::Command;

use anyhow::Context;
use tracing::debug;

use crate::config::TargetSection;
use crate::errors::Result;
use crate::exec::ExecOutcome;

/// Connection details for the VM. The user comes from the execution context
/// per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub identity_file: Option<String>,
}

impl SshTarget {
    pub fn from_settings(target: &TargetSection) -> Self {
        Self {
            host: target.host.clone(),
            port: target.port,
            identity_file: target.identity_file.clone(),
        }
    }

    /// Arguments passed to `ssh` for running `command` as `user`.
    pub fn build_args(&self, user: &str, command: &str) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(identity_file) = &self.identity_file {
            args.push("-i".to_string());
            args.push(expand_home(identity_file));
        }

        if self.port != 22 {
            args.push("-p".to_string());
            args.push(self.port.to_string());
        }

        // Vagrant boxes get fresh host keys on every `vagrant up`.
        args.extend([
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "-o".to_string(),
            "LogLevel=ERROR".to_string(),
        ]);

        args.push(format!("{}@{}", user, self.host));
        args.push(command.to_string());
        args
    }

    /// Run `command` on the VM as `user` and wait for it.
    pub fn exec(&self, user: &str, command: &str) -> Result<ExecOutcome> {
        let args = self.build_args(user, command);
        debug!(host = %self.host, port = self.port, user, "ssh");

        let status = Command::new("ssh")
            .args(&args)
            .status()
            .with_context(|| format!("spawning ssh to {}", self.host))?;

        Ok(ExecOutcome {
            exit_code: status.code().unwrap_or(-1),
        })
    }
}

/// Expand a leading `~/` to `$HOME`; anything else is returned unchanged.
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{}/{}", home.trim_end_matches('/'), rest),
        _ => path.to_string(),
    }
}
