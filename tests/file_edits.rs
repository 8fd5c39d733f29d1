// tests/file_edits.rs

//! The edit tasks, rendered by the runner and carried out by the system
//! backend against files in a temporary directory.

use std::fs;
use std::path::Path;

use tempfile::tempdir;
use vagrantfab::config::{PLACEHOLDER_TOKEN, Settings, load_and_validate};
use vagrantfab::exec::edit::seed_if_missing;
use vagrantfab::context::ExecutionContext;
use vagrantfab::exec::{Action, Backend, SystemBackend};
use vagrantfab::runner::plan;
use vagrantfab::tasks::{Invocation, builtin_registry};

/// Render `task` and apply its edits with paths rebased into `dir`.
fn apply_edits(dir: &Path, settings: &Settings, ctx: &mut ExecutionContext, task: &str) {
    let registry = builtin_registry();
    let actions = plan(&registry, settings, ctx, &Invocation::new(task)).unwrap();
    let mut backend = SystemBackend::from_settings(settings);

    for planned in actions {
        let action = match planned.action {
            Action::AppendLines { path, lines } => Action::AppendLines {
                path: dir.join(path),
                lines,
            },
            other => other,
        };
        let outcome = backend.execute(&planned.task, &action, ctx).unwrap();
        assert!(outcome.is_success());
    }
}

#[test]
fn update_gitignore_appends_vagrant_and_idea() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "a\nb\n").unwrap();

    let settings = Settings::default();
    let mut ctx = ExecutionContext::new();
    apply_edits(dir.path(), &settings, &mut ctx, "update_gitignore");

    let contents = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
    assert_eq!(contents.lines().collect::<Vec<_>>(), ["a", "b", ".vagrant/", ".idea/"]);
    assert!(!contents.contains("\n\n"));
}

#[test]
fn update_gitignore_handles_missing_final_newline() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "a\nb").unwrap();

    let settings = Settings::default();
    let mut ctx = ExecutionContext::new();
    apply_edits(dir.path(), &settings, &mut ctx, "update_gitignore");

    assert_eq!(
        fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
        "a\nb\n.vagrant/\n.idea/\n"
    );
}

#[test]
fn update_fab_resolves_the_settings_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Fabfile.toml");
    fs::write(
        &path,
        format!("[project]\nname = \"{PLACEHOLDER_TOKEN}\"\n"),
    )
    .unwrap();

    let settings = load_and_validate(&path).unwrap();
    assert!(settings.project.is_placeholder());

    let mut ctx = ExecutionContext::new();
    ctx.project_name = Some("blog".into());
    apply_edits(dir.path(), &settings, &mut ctx, "update_fab");

    let reloaded = load_and_validate(&path).unwrap();
    assert_eq!(reloaded.project.name, "blog");
}

#[test]
fn init_edits_create_the_settings_file_when_running_on_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Fabfile.toml");
    fs::write(dir.path().join(".gitignore"), "*.pyc\n").unwrap();

    let settings = Settings {
        source: path.clone(),
        ..Settings::default()
    };
    let registry = builtin_registry();
    let mut ctx = ExecutionContext::new();
    let init: Invocation = "init:blog".parse().unwrap();
    let actions = plan(&registry, &settings, &mut ctx, &init).unwrap();

    let mut backend = SystemBackend::from_settings(&settings);
    let mut edited = Vec::new();
    for planned in actions {
        let action = match planned.action {
            Action::AppendLines { path, lines } => Action::AppendLines {
                path: dir.path().join(path),
                lines,
            },
            edit @ Action::ReplaceToken { .. } => edit,
            _ => continue,
        };
        let outcome = backend.execute(&planned.task, &action, &ctx).unwrap();
        assert!(outcome.is_success());
        edited.push(planned.task);
    }

    assert_eq!(edited, ["update_fab", "update_gitignore"]);
    let reloaded = load_and_validate(&path).unwrap();
    assert_eq!(reloaded.project.name, "blog");
    assert_eq!(reloaded.target, Settings::default().target);
    assert_eq!(
        fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
        "*.pyc\n.vagrant/\n.idea/\n"
    );
}

#[test]
fn existing_settings_file_is_not_reseeded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Fabfile.toml");
    fs::write(&path, "[target]\nport = 2200\n").unwrap();

    assert!(!seed_if_missing(&path, "[project]\n").unwrap());
    assert_eq!(load_and_validate(&path).unwrap().target.port, 2200);
}
