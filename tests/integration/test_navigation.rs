//! Integration Tests for Navigation
//!
//! `up` and `cd` run inline, so their output precedes the cursor line.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use fmshell::output::messages;
use test_utils::{write_file, TestShell};

#[tokio::test]
async fn test_cd_into_subdirectory_prints_location_twice() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    let lines = t.run_lines("cd sub").await;
    let expected = messages::location(&t.path("sub"));
    assert_eq!(lines, vec![expected.clone(), expected]);
    assert_eq!(t.shell.session().current_dir(), t.path("sub"));
}

#[tokio::test]
async fn test_cd_to_missing_directory_keeps_cursor() {
    let mut t = TestShell::new();
    let before = t.shell.session().current_dir().to_path_buf();

    let lines = t.run_lines("cd /nonexistent/for/sure").await;
    assert_eq!(lines, vec!["Operation failed".to_string(), t.location()]);
    assert_eq!(t.shell.session().current_dir(), before);
}

#[tokio::test]
async fn test_cd_into_file_keeps_cursor() {
    let mut t = TestShell::new();
    write_file(t.root(), "plain.txt", b"x");

    let lines = t.run_lines("cd plain.txt").await;
    assert_eq!(lines, vec!["Operation failed".to_string(), t.location()]);
    assert_eq!(t.shell.session().current_dir(), t.root());
}

#[tokio::test]
async fn test_cd_without_argument_stays_put() {
    let mut t = TestShell::new();
    t.run("cd").await;
    assert_eq!(t.shell.session().current_dir(), t.root());
}

#[tokio::test]
async fn test_up_moves_to_parent() {
    let mut t = TestShell::new();
    std::fs::create_dir_all(t.path("a/b")).unwrap();
    t.run("cd a/b").await;
    t.lines();

    let lines = t.run_lines("up").await;
    let expected = messages::location(&t.path("a"));
    assert_eq!(lines, vec![expected.clone(), expected]);
}

#[tokio::test]
async fn test_cd_dotdot_matches_up() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();
    t.run("cd sub").await;
    t.run("cd ..").await;
    assert_eq!(t.shell.session().current_dir(), t.root());
}

#[cfg(unix)]
#[tokio::test]
async fn test_up_at_root_prints_only_the_cursor_line() {
    let mut t = TestShell::new();
    t.run("cd /").await;
    t.lines();

    let lines = t.run_lines("up").await;
    assert_eq!(lines, vec![messages::location(std::path::Path::new("/"))]);
    assert_eq!(t.shell.session().current_dir(), std::path::Path::new("/"));
}

#[tokio::test]
async fn test_navigation_leaves_process_cwd_alone() {
    let cwd = std::env::current_dir().unwrap();
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    t.run("cd sub").await;
    t.run("up").await;
    assert_eq!(std::env::current_dir().unwrap(), cwd);
}

#[tokio::test]
async fn test_relative_paths_follow_the_cursor() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    t.run("cd sub").await;
    t.run("add inside.txt").await;
    assert!(t.path("sub/inside.txt").is_file());
    assert!(!t.path("inside.txt").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_cd_into_symlinked_directory_fails() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("real")).unwrap();
    std::os::unix::fs::symlink(t.path("real"), t.path("alias")).unwrap();

    let lines = t.run_lines("cd alias").await;
    assert_eq!(lines, vec!["Operation failed".to_string(), t.location()]);
    assert_eq!(t.shell.session().current_dir(), t.root());
}
