// tests/invocations.rs

use vagrantfab::errors::FabError;
use vagrantfab::parse_invocations;
use vagrantfab::tasks::{Invocation, builtin_registry};

fn raw(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn several_tasks_parse_in_order() {
    let registry = builtin_registry();
    let invocations = parse_invocations(
        &registry,
        &raw(&["init:blog", "git_commit:comment=second", "serve"]),
    )
    .unwrap();

    assert_eq!(
        invocations,
        vec![
            Invocation::new("init").positional("blog"),
            Invocation::new("git_commit").keyword("comment", "second"),
            Invocation::new("serve"),
        ]
    );
}

#[test]
fn no_tasks_is_an_error() {
    let registry = builtin_registry();
    assert!(matches!(
        parse_invocations(&registry, &[]),
        Err(FabError::InvalidInvocation(msg)) if msg.contains("--list")
    ));
}

#[test]
fn a_bad_later_task_is_caught_up_front() {
    let registry = builtin_registry();

    let unknown = parse_invocations(&registry, &raw(&["init:blog", "deploy"]));
    assert!(matches!(unknown, Err(FabError::TaskNotFound(name)) if name == "deploy"));

    let bad_keyword = parse_invocations(&registry, &raw(&["serve", "git_add:path=src"]));
    assert!(matches!(bad_keyword, Err(FabError::InvalidInvocation(msg)) if msg.contains("path")));

    let too_many = parse_invocations(&registry, &raw(&["build:blog"]));
    assert!(matches!(too_many, Err(FabError::InvalidInvocation(_))));
}
