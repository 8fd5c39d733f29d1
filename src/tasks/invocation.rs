// src/tasks/invocation.rs

//! Parsing of command-line task invocations.
//!
//! Syntax is `name` or `name:arg,arg,...` where each `arg` is either a
//! positional `value` or a keyword `key=value`. `\,`, `\=` and `\\` produce a
//! literal comma, equals sign or backslash; any other backslash is kept as is.

use std::fmt;
use std::str::FromStr;

use crate::errors::FabError;

/// One argument of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Positional(String),
    Keyword(String, String),
}

/// A task name plus the arguments it was invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub task: String,
    pub args: Vec<Arg>,
}

impl Invocation {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            args: Vec::new(),
        }
    }

    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Positional(value.into()));
        self
    }

    pub fn keyword(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(Arg::Keyword(key.into(), value.into()));
        self
    }
}

impl FromStr for Invocation {
    type Err = FabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (task, rest) = match s.split_once(':') {
            Some((task, rest)) => (task, Some(rest)),
            None => (s, None),
        };

        let task = task.trim();
        if task.is_empty() {
            return Err(FabError::InvalidInvocation(format!(
                "missing task name in '{s}'"
            )));
        }

        let args = match rest {
            Some(rest) if !rest.is_empty() => parse_args(rest)?,
            _ => Vec::new(),
        };

        Ok(Self {
            task: task.to_string(),
            args,
        })
    }
}

fn parse_args(input: &str) -> Result<Vec<Arg>, FabError> {
    let mut args = Vec::new();
    let mut key: Option<String> = None;
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some(',' | '=' | '\\')) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '=' if key.is_none() => {
                key = Some(std::mem::take(&mut current));
            }
            ',' => {
                args.push(finish_arg(key.take(), std::mem::take(&mut current))?);
            }
            _ => current.push(c),
        }
    }
    args.push(finish_arg(key, current)?);

    Ok(args)
}

fn finish_arg(key: Option<String>, value: String) -> Result<Arg, FabError> {
    match key {
        Some(key) if key.is_empty() => Err(FabError::InvalidInvocation(format!(
            "keyword argument '={value}' has an empty name"
        ))),
        Some(key) => Ok(Arg::Keyword(key, value)),
        None => Ok(Arg::Positional(value)),
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.task)?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { ":" } else { "," })?;
            match arg {
                Arg::Positional(v) => write!(f, "{}", escape(v))?,
                Arg::Keyword(k, v) => write!(f, "{}={}", escape(k), escape(v))?,
            }
        }
        Ok(())
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace('=', "\\=")
}
