// src/context.rs

//! Execution context shared along one task call chain.
//!
//! Composite tasks fill in the remote user and project name, then enter the
//! target directory through [`ScopedDir`]. Leaf tasks only read.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::errors::{FabError, Result};

/// Process-lifetime state read by every task in a call chain.
///
/// Every field starts unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// User remote commands connect as.
    pub remote_user: Option<String>,

    /// Name of the Django project; substituted into `manage.py` paths.
    pub project_name: Option<String>,

    /// Stack of entered directories, innermost last. Each entry is already
    /// joined with its parent.
    dirs: Vec<String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project name, or an error if no composite task has configured it.
    pub fn project_name(&self) -> Result<&str> {
        self.project_name
            .as_deref()
            .ok_or(FabError::ContextNotConfigured("project_name"))
    }

    /// Innermost entered directory, if any scope is active.
    pub fn working_directory(&self) -> Option<&str> {
        self.dirs.last().map(String::as_str)
    }

    /// Enter `dir` until the returned guard is dropped.
    ///
    /// Relative directories are joined onto the current one, so nested scopes
    /// compose like nested `cd`s.
    pub fn enter_dir(&mut self, dir: impl Into<String>) -> ScopedDir<'_> {
        let dir = dir.into();
        let resolved = match self.working_directory() {
            Some(current) if !dir.starts_with('/') => {
                format!("{}/{}", current.trim_end_matches('/'), dir)
            }
            _ => dir,
        };

        debug!(dir = %resolved, "entering directory scope");
        self.dirs.push(resolved);
        let depth = self.dirs.len();
        ScopedDir { ctx: self, depth }
    }
}

/// Guard returned by [`ExecutionContext::enter_dir`].
///
/// Restores the previous working directory when dropped, including during
/// `?` early returns and unwinding. Derefs to the context so the call chain
/// keeps using it while the scope is active.
#[derive(Debug)]
pub struct ScopedDir<'a> {
    ctx: &'a mut ExecutionContext,
    depth: usize,
}

impl Deref for ScopedDir<'_> {
    type Target = ExecutionContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ScopedDir<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ScopedDir<'_> {
    fn drop(&mut self) {
        self.ctx.dirs.truncate(self.depth - 1);
        debug!(
            dir = ?self.ctx.working_directory(),
            "left directory scope"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_unconfigured() {
        let ctx = ExecutionContext::new();
        assert!(matches!(
            ctx.project_name(),
            Err(FabError::ContextNotConfigured("project_name"))
        ));
        assert_eq!(ctx.working_directory(), None);
        assert_eq!(ctx.remote_user, None);
    }

    #[test]
    fn scope_restores_previous_directory() {
        let mut ctx = ExecutionContext::new();
        {
            let mut outer = ctx.enter_dir("/vagrant");
            assert_eq!(outer.working_directory(), Some("/vagrant"));
            {
                let inner = outer.enter_dir("blog");
                assert_eq!(inner.working_directory(), Some("/vagrant/blog"));
            }
            assert_eq!(outer.working_directory(), Some("/vagrant"));

            let abs = outer.enter_dir("/tmp");
            assert_eq!(abs.working_directory(), Some("/tmp"));
        }
        assert_eq!(ctx.working_directory(), None);
    }

    #[test]
    fn scope_restores_on_early_return() {
        fn fails_inside(ctx: &mut ExecutionContext) -> Result<()> {
            let scoped = ctx.enter_dir("/vagrant");
            scoped.project_name()?;
            Ok(())
        }

        let mut ctx = ExecutionContext::new();
        assert!(fails_inside(&mut ctx).is_err());
        assert_eq!(ctx.working_directory(), None);
    }

    #[test]
    fn scope_restores_on_panic() {
        let mut ctx = ExecutionContext::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scoped = ctx.enter_dir("/vagrant");
            panic!("step blew up");
        }));
        assert!(result.is_err());
        assert_eq!(ctx.working_directory(), None);
    }

    #[test]
    fn writes_through_the_guard_persist() {
        let mut ctx = ExecutionContext::new();
        {
            let mut scoped = ctx.enter_dir("/vagrant");
            scoped.project_name = Some("blog".to_string());
        }
        assert_eq!(ctx.project_name().unwrap(), "blog");
    }
}
