// src/tasks/builtin.rs

//! The provisioning tasks: local git/file chores, remote Django commands,
//! and the composites that chain them.

use std::path::PathBuf;

use crate::config::{PLACEHOLDER_TOKEN, SEED_SETTINGS};
use crate::errors::Result;
use crate::exec::Action;
use crate::exec::shell::double_quote;
use crate::tasks::registry::{TaskRegistry, TaskSpec};
use crate::tasks::{
    ContextSetup, Param, RenderFn, Sequence, Step, StepArg, TaskBody, TaskCall,
};

/// Lines `update_gitignore` appends, in order.
pub const GITIGNORE_ADDITIONS: [&str; 2] = [".vagrant/", ".idea/"];

/// Build the registry of every provisioning task.
pub fn builtin_registry() -> TaskRegistry {
    let mut registry = TaskRegistry::new();

    // Local tasks.
    registry
        .register(leaf("rm_git", "Remove old repo.", vec![], rm_git))
        .register(leaf("git_init", "Initialise a git repository.", vec![], git_init))
        .register(leaf(
            "git_add",
            "Add files to the git index.",
            vec![Param::new("file_path", ".")],
            git_add,
        ))
        .register(leaf(
            "git_commit",
            "Commit the git index.",
            vec![Param::new("comment", "")],
            git_commit,
        ))
        .register(leaf(
            "update_gitignore",
            "Add vagrant and IDE files to .gitignore.",
            vec![],
            update_gitignore,
        ))
        .register(leaf(
            "update_fab",
            "Replace the project name placeholder in the settings file.",
            vec![],
            update_fab,
        ))
        .register(leaf(
            "pre_init",
            "Remove the template's README.md and .gitignore.",
            vec![],
            pre_init,
        ));

    // Remote tasks.
    registry
        .register(leaf("install_django", "Install django.", vec![], install_django))
        .register(leaf(
            "install_twoscoops",
            "Create the project from the twoscoops template.",
            vec![Param::new("command", "icecream")],
            install_twoscoops,
        ))
        .register(leaf(
            "requirements",
            "Install python requirements.",
            vec![],
            requirements,
        ))
        .register(leaf("syncdb", "Run syncdb.", vec![], syncdb))
        .register(leaf("migrate", "Run migrate.", vec![], migrate))
        .register(leaf("runserver", "Run the dev server.", vec![], runserver))
        .register(leaf("filldb", "Fill the database with test data.", vec![], filldb));

    // Composite tasks.
    registry
        .register(TaskSpec {
            name: "init",
            doc: "Init project with the given project name.",
            params: vec![Param::new("project_name", "")],
            body: TaskBody::Sequence(Sequence {
                setup: Some(ContextSetup::FromParam("project_name")),
                steps: vec![
                    Step::new("pre_init"),
                    Step::new("install_django"),
                    Step::new("install_twoscoops").arg(StepArg::ProjectName),
                    Step::new("requirements"),
                    Step::new("syncdb"),
                    Step::new("migrate"),
                    Step::new("post_init"),
                ],
            }),
        })
        .register(TaskSpec {
            name: "post_init",
            doc: "Turn the fresh project into its own git repository.",
            params: vec![],
            body: TaskBody::Sequence(Sequence {
                setup: None,
                steps: vec![
                    Step::new("update_fab"),
                    Step::new("update_gitignore"),
                    Step::new("rm_git"),
                    Step::new("git_init"),
                    Step::new("git_add"),
                    Step::new("git_commit").arg(StepArg::literal("Initial commit")),
                ],
            }),
        })
        .register(from_settings(
            "build",
            "Build project.",
            &["requirements", "syncdb", "migrate", "filldb"],
        ))
        .register(from_settings(
            "update",
            "Update project.",
            &["requirements", "syncdb", "migrate"],
        ))
        .register(from_settings("serve", "Start the dev server.", &["runserver"]));

    registry
}

fn leaf(
    name: &'static str,
    doc: &'static str,
    params: Vec<Param>,
    render: RenderFn,
) -> TaskSpec {
    TaskSpec {
        name,
        doc,
        params,
        body: TaskBody::Actions(render),
    }
}

/// Composite without parameters whose project name comes from the settings.
fn from_settings(name: &'static str, doc: &'static str, steps: &[&'static str]) -> TaskSpec {
    TaskSpec {
        name,
        doc,
        params: vec![],
        body: TaskBody::Sequence(Sequence {
            setup: Some(ContextSetup::FromSettings),
            steps: steps.iter().copied().map(Step::new).collect(),
        }),
    }
}

fn rm_git(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.local("rm -rf .git/")])
}

fn git_init(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.local("git init")])
}

fn git_add(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.local(format!("git add {}", call.arg("file_path")))])
}

fn git_commit(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.local(format!(
        "git commit -m {}",
        double_quote(call.arg("comment"))
    ))])
}

fn update_gitignore(_call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![Action::AppendLines {
        path: PathBuf::from(".gitignore"),
        lines: GITIGNORE_ADDITIONS.iter().map(|l| l.to_string()).collect(),
    }])
}

fn update_fab(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![Action::ReplaceToken {
        path: call.settings.source.clone(),
        token: PLACEHOLDER_TOKEN.to_string(),
        value: call.ctx.project_name()?.to_string(),
        seed: Some(SEED_SETTINGS.to_string()),
    }])
}

fn pre_init(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.local("rm README.md"), call.local("rm .gitignore")])
}

fn install_django(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.remote("sudo pip install django")])
}

fn install_twoscoops(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.remote(format!(
        "django-admin.py startproject --template={} --extension=py,rst,html {} {}",
        call.settings.project.template,
        call.arg("command"),
        call.settings.target.path,
    ))])
}

fn requirements(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    Ok(vec![call.remote("sudo pip install -r requirements/local.txt")])
}

/// `python <project>/manage.py <subcommand>` on the VM.
fn manage(call: &TaskCall<'_>, subcommand: &str) -> Result<Vec<Action>> {
    let project = call.ctx.project_name()?;
    Ok(vec![call.remote(format!("python {project}/manage.py {subcommand}"))])
}

fn syncdb(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    manage(call, "syncdb --all --noinput")
}

fn migrate(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    manage(call, "migrate --fake")
}

fn runserver(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    manage(call, "runserver 0.0.0.0:8000")
}

fn filldb(call: &TaskCall<'_>) -> Result<Vec<Action>> {
    manage(call, "filldb")
}
