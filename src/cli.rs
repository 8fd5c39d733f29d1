// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `vagrantfab`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vagrantfab",
    version,
    about = "Provision a Django project inside a Vagrant VM.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run, in order. Each is `name` or `name:arg,key=value`.
    ///
    /// Use `\,` and `\=` for a literal comma or equals sign in a value.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Path to the settings file (TOML).
    ///
    /// Default: `Fabfile.toml` in the current directory, if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override the SSH host of the VM.
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override the SSH port of the VM.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the SSH identity file.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub identity: Option<String>,

    /// Pre-set the project name, so project tasks like `syncdb` can run
    /// without a composite task configuring the context first.
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VAGRANTFAB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the commands the tasks would run, without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// List available tasks.
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Show the description and parameters of one task.
    #[arg(short = 'd', long, value_name = "TASK")]
    pub display: Option<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_and_flags_parse_together() {
        let args = CliArgs::try_parse_from([
            "vagrantfab",
            "--dry-run",
            "-H",
            "10.0.0.5",
            "init:blog",
            "git_commit:comment=first",
        ])
        .unwrap();

        assert!(args.dry_run);
        assert_eq!(args.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(args.tasks, vec!["init:blog", "git_commit:comment=first"]);
    }

    #[test]
    fn list_needs_no_tasks() {
        let args = CliArgs::try_parse_from(["vagrantfab", "-l"]).unwrap();
        assert!(args.list);
        assert!(args.tasks.is_empty());
    }
}
