//! Integration tests for the workspace registry on disk and the CLI surface.

use bashlog::Error;
use bashlog::core::registry;
use bashlog::storage::{FileBackend, WorkspaceStore};
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> FileBackend {
    FileBackend::new(temp.path().join("workspaces"))
}

/// Run `bashlog-mgr` against an isolated state root.
fn mgr(root: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_bashlog-mgr"))
        .args(args)
        .env("BASHLOG_WORKSPACES", root.join("workspaces"))
        .env("BASHLOG_CONFIG", root.join("absent.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn full_lifecycle_on_disk() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let base: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();

    registry::create_at(&store, "t1", base).unwrap();
    registry::create_at(&store, "t2", base + Duration::hours(1)).unwrap();
    registry::create_at(&store, "t3", base + Duration::hours(2)).unwrap();

    let names: Vec<_> = registry::list(&store)
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, vec!["t3", "t2", "t1"]);

    store.append_history("t2", "echo hi").unwrap();
    let detail = registry::view(&store, "t2").unwrap();
    assert_eq!(detail.recent_history, vec!["echo hi"]);

    registry::delete(&store, "t2").unwrap();
    let names: Vec<_> = registry::list(&store)
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, vec!["t3", "t1"]);
}

#[test]
fn externally_updated_command_counts_aggregate() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    for (name, count) in [("a", 2), ("b", 4), ("c", 6)] {
        registry::create(&store, name).unwrap();
        let config = store.workspace_dir(name).join("config.txt");
        let text = fs::read_to_string(&config)
            .unwrap()
            .replace("commands=0", &format!("commands={count}"));
        fs::write(&config, text).unwrap();
    }

    let stats = registry::stats(&store).unwrap();
    assert_eq!(stats.total_commands, 12);
    assert!((stats.average_commands - 4.0).abs() < f64::EPSILON);
}

#[test]
fn half_created_workspace_still_lists() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(store.workspace_dir("orphan")).unwrap();

    let workspaces = registry::list(&store).unwrap();
    assert_eq!(workspaces.len(), 1);
    assert_eq!(workspaces[0].command_count, 0);
    assert!(workspaces[0].created_unknown());

    assert!(matches!(
        registry::create(&store, "orphan"),
        Err(Error::AlreadyExists(_))
    ));
}

#[test]
fn names_outside_the_alphabet_never_reach_the_disk() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    registry::create(&store, "keep").unwrap();
    fs::write(temp.path().join("precious"), "outside the root").unwrap();

    for name in ["", ".", ".."] {
        assert!(
            matches!(registry::view(&store, name), Err(Error::NotFound(_))),
            "view {name:?}"
        );
        assert!(
            matches!(registry::history(&store, name, 5), Err(Error::NotFound(_))),
            "history {name:?}"
        );
        assert!(
            matches!(registry::delete(&store, name), Err(Error::NotFound(_))),
            "delete {name:?}"
        );
    }

    assert!(store.exists("keep"));
    assert!(temp.path().join("precious").is_file());
}

#[test]
fn cli_delete_of_parent_name_is_refused() {
    let temp = TempDir::new().unwrap();
    assert!(mgr(temp.path(), &["create", "keep"], "").status.success());

    for name in ["", ".", ".."] {
        let output = mgr(temp.path(), &["delete", name], "yes\n");
        assert_eq!(output.status.code(), Some(1), "delete {name:?}");
        assert!(!stdout(&output).contains("Are you sure"), "delete {name:?}");
    }

    assert!(temp.path().join("workspaces/keep").is_dir());
}

#[test]
fn history_with_trailing_blank_lines() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    registry::create(&store, "ws").unwrap();
    fs::write(
        store.workspace_dir("ws").join("history.log"),
        "one\n\ntwo\nthree\n\n",
    )
    .unwrap();

    let lines = registry::history(&store, "ws", 20).unwrap().unwrap();
    assert_eq!(lines, vec!["one", "two", "three"]);
}

#[test]
fn cli_create_list_delete() {
    let temp = TempDir::new().unwrap();

    let created = mgr(temp.path(), &["create", "my-project_01"], "");
    assert!(created.status.success());
    assert!(stdout(&created).contains("created successfully"));

    let listed = mgr(temp.path(), &["list"], "");
    assert!(listed.status.success());
    assert!(stdout(&listed).contains("my-project_01"));

    let cancelled = mgr(temp.path(), &["delete", "my-project_01"], "no\n");
    assert!(cancelled.status.success());
    assert!(stdout(&cancelled).contains("Deletion cancelled"));
    assert!(temp.path().join("workspaces/my-project_01").is_dir());

    let deleted = mgr(temp.path(), &["delete", "my-project_01"], "yes\n");
    assert!(deleted.status.success());
    assert!(!temp.path().join("workspaces/my-project_01").exists());
}

#[test]
fn cli_errors_exit_one() {
    let temp = TempDir::new().unwrap();

    for args in [
        vec!["frobnicate"],
        vec!["create"],
        vec!["view", "ghost"],
        vec!["create", "bad name"],
        vec![],
    ] {
        let output = mgr(temp.path(), &args, "");
        assert_eq!(output.status.code(), Some(1), "args {args:?}");
        assert!(!output.stderr.is_empty(), "args {args:?}");
    }
}

#[test]
fn cli_help_and_empty_stats_succeed() {
    let temp = TempDir::new().unwrap();

    let help = mgr(temp.path(), &["help"], "");
    assert!(help.status.success());
    assert!(stdout(&help).contains("history"));

    let stats = mgr(temp.path(), &["stats"], "");
    assert!(stats.status.success());
    assert!(stdout(&stats).contains("No workspaces found"));
}
