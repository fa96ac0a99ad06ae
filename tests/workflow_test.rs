// tests/workflow_test.rs
mod common;

use common::{assert_default_message, Fixture};
use deploy_push::cli::{run_deploy_workflow, DeployWorkflowArgs};
use deploy_push::config::{Backend, Config};
use deploy_push::git::{open_workspace, CommitOutcome, Git2Workspace, StatusEntry, Workspace};
use deploy_push::ui::SUCCESS_BANNER;
use std::io::Cursor;

fn run_once(workspace: &dyn Workspace, stdin: &str) -> (deploy_push::cli::WorkflowResult, String) {
    let mut input = Cursor::new(stdin.to_string());
    let mut out = Vec::new();
    let result = run_deploy_workflow(
        workspace,
        &Config::default(),
        &DeployWorkflowArgs::default(),
        &mut input,
        &mut out,
    )
    .expect("workflow failed");
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_workflow_against_real_repository() {
    let fixture = Fixture::with_remote();
    fixture.write("app.py", "print('hi')\n");
    fixture.write("requirements.txt", "flask\n");

    let workspace = open_workspace(fixture.work.path(), Backend::Libgit2).unwrap();
    let (result, out) = run_once(workspace.as_ref(), "\n");

    assert!(result.pushed);
    assert!(matches!(result.commit, Some(CommitOutcome::Created { .. })));
    assert_default_message(&result.message, "Update");
    assert!(out.contains("?? app.py"));
    assert!(out.contains("?? requirements.txt"));
    assert!(out.contains(SUCCESS_BANNER));
}

#[test]
fn test_workflow_is_idempotent() {
    let fixture = Fixture::with_remote();
    fixture.write("app.py", "print('hi')\n");
    let workspace = Git2Workspace::open(fixture.work.path()).unwrap();

    let (first, _) = run_once(&workspace, "first\n");
    assert!(first.pushed);

    assert!(workspace.status().unwrap().is_empty());
    let (second, out) = run_once(&workspace, "second\n");
    assert!(second.pushed);
    assert_eq!(second.commit, Some(CommitOutcome::NothingToCommit));
    assert!(out.contains("working tree clean"));
    assert_eq!(fixture.head_message(), "first");
}

#[test]
fn test_git_cli_backend_commits_then_pushes_up_to_date() {
    let fixture = Fixture::with_remote();
    fixture.write("app.py", "print('hi')\n");
    let workspace = open_workspace(fixture.work.path(), Backend::GitCli).unwrap();

    let (first, out) = run_once(workspace.as_ref(), "first\n");
    assert!(first.pushed, "{}", out);
    assert!(matches!(first.commit, Some(CommitOutcome::Created { .. })));
    assert!(out.contains("?? app.py"));
    assert_eq!(fixture.head_message().trim_end(), "first");

    let head = fixture.repo().head().unwrap().target();
    assert_eq!(fixture.remote_main(), head);

    let (second, out) = run_once(workspace.as_ref(), "second\n");
    assert!(second.pushed, "{}", out);
    assert_eq!(second.commit, Some(CommitOutcome::NothingToCommit));
    assert!(out.contains("working tree clean"));
    assert_eq!(fixture.head_message().trim_end(), "first");
    assert_eq!(fixture.remote_main(), head);
}

#[test]
fn test_modified_and_deleted_files_are_committed() {
    let fixture = Fixture::with_remote();
    fixture.write("app.py", "v1\n");
    fixture.write("old.py", "legacy\n");
    let workspace = Git2Workspace::open(fixture.work.path()).unwrap();
    run_once(&workspace, "initial\n");

    fixture.write("app.py", "v2\n");
    std::fs::remove_file(fixture.work.path().join("old.py")).unwrap();
    assert_eq!(
        workspace.status().unwrap(),
        vec![
            StatusEntry::new(' ', 'M', "app.py"),
            StatusEntry::new(' ', 'D', "old.py"),
        ]
    );

    let (result, _) = run_once(&workspace, "update app\n");
    assert!(result.pushed);

    let repo = fixture.repo();
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("old.py").is_none());
    let blob = tree
        .get_name("app.py")
        .unwrap()
        .to_object(&repo)
        .unwrap()
        .peel_to_blob()
        .unwrap();
    assert_eq!(blob.content(), b"v2\n");
    assert_eq!(fixture.remote_main(), repo.head().unwrap().target());
}

#[test]
fn test_gitignored_files_are_not_staged() {
    let fixture = Fixture::with_remote();
    fixture.write(".gitignore", "*.log\n");
    fixture.write("app.py", "v1\n");
    fixture.write("debug.log", "noise\n");
    let workspace = Git2Workspace::open(fixture.work.path()).unwrap();

    let (_, out) = run_once(&workspace, "\n");
    assert!(!out.contains("debug.log"));

    let repo = fixture.repo();
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("app.py").is_some());
    assert!(tree.get_name("debug.log").is_none());
}
