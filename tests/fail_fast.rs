// tests/fail_fast.rs

use vagrantfab::config::Settings;
use vagrantfab::context::ExecutionContext;
use vagrantfab::errors::FabError;
use vagrantfab::runner::Runner;
use vagrantfab::tasks::{Invocation, TaskRegistry, builtin_registry};
use vagrantfab_test_utils::{RecordingBackend, init_tracing};

/// Context with a project name, so `post_init` can also run on its own.
fn seeded_context() -> ExecutionContext {
    let mut ctx = ExecutionContext::new();
    ctx.project_name = Some("blog".into());
    ctx
}

/// Number of actions a clean run of `invocation` issues.
fn action_count(registry: &TaskRegistry, settings: &Settings, invocation: &Invocation) -> usize {
    let mut ctx = seeded_context();
    let mut runner = Runner::new(registry, settings, RecordingBackend::new());
    runner.run(&mut ctx, invocation).unwrap();
    runner.backend().recorded.len()
}

fn assert_stops_at_every_position(invocation: Invocation) {
    init_tracing();
    let registry = builtin_registry();
    let settings = Settings::default();
    let total = action_count(&registry, &settings, &invocation);
    assert!(total > 0);

    for position in 0..total {
        let mut ctx = seeded_context();
        let mut runner = Runner::new(&registry, &settings, RecordingBackend::failing_at(position));

        let err = runner.run(&mut ctx, &invocation).unwrap_err();

        assert!(
            matches!(err, FabError::CommandFailed { exit_code: 1, .. }),
            "{invocation} at {position}: {err:?}"
        );
        // The failing action was issued; nothing after it was.
        assert_eq!(
            runner.backend().recorded.len(),
            position + 1,
            "{invocation} kept going after failure at {position}"
        );
        // The failing task is the last one started.
        let failed_task = &runner.backend().recorded[position].task;
        assert_eq!(&runner.history().last().unwrap().task, failed_task);
        // The directory scope was unwound on the way out.
        assert_eq!(ctx.working_directory(), None);
    }
}

#[test]
fn init_stops_at_first_failure() {
    assert_stops_at_every_position(Invocation::new("init").positional("blog"));
}

#[test]
fn post_init_stops_at_first_failure() {
    assert_stops_at_every_position(Invocation::new("post_init"));
}

#[test]
fn build_stops_at_first_failure() {
    assert_stops_at_every_position(Invocation::new("build"));
}

#[test]
fn update_stops_at_first_failure() {
    assert_stops_at_every_position(Invocation::new("update"));
}

#[test]
fn serve_stops_at_first_failure() {
    assert_stops_at_every_position(Invocation::new("serve"));
}

#[test]
fn failure_in_pre_init_skips_second_removal() {
    let registry = builtin_registry();
    let settings = Settings::default();
    let mut ctx = ExecutionContext::new();
    let mut runner = Runner::new(&registry, &settings, RecordingBackend::failing_at(0));

    let err = runner
        .run(&mut ctx, &Invocation::new("init").positional("blog"))
        .unwrap_err();

    assert_eq!(runner.backend().commands(), ["rm README.md"]);
    assert_eq!(
        err.to_string(),
        "local() encountered an error (return code 1) while executing 'rm README.md' in task 'pre_init'"
    );
}

#[test]
fn failed_edit_is_reported_by_operation() {
    let registry = builtin_registry();
    let settings = Settings::default();
    let mut ctx = ExecutionContext::new();
    ctx.project_name = Some("blog".into());
    // post_init: update_fab is the first action.
    let mut runner = Runner::new(&registry, &settings, RecordingBackend::failing_at(0));

    let err = runner.run(&mut ctx, &Invocation::new("post_init")).unwrap_err();

    match err {
        FabError::CommandFailed { task, operation, .. } => {
            assert_eq!(task, "update_fab");
            assert_eq!(operation, "sed");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}
