//! Integration Tests for Error Handling
//!
//! Every failure renders as one of two fixed strings and the loop always
//! comes back to the prompt.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use fmshell::output::messages;
use fmshell::platform::arch_name;
use fmshell::shell::Flow;
use fmshell::ShellState;
use test_utils::{write_file, TestShell};

#[tokio::test]
async fn test_unknown_command_is_invalid_input() {
    let mut t = TestShell::new();
    let lines = t.run_lines("frobnicate now").await;
    assert_eq!(lines, vec!["Invalid input".to_string(), t.location()]);
}

#[tokio::test]
async fn test_empty_line_is_invalid_input() {
    let mut t = TestShell::new();
    let lines = t.run_lines("   ").await;
    assert_eq!(lines, vec!["Invalid input".to_string(), t.location()]);
}

#[tokio::test]
async fn test_command_tokens_are_case_sensitive() {
    let mut t = TestShell::new();
    let lines = t.run_lines("LS").await;
    assert_eq!(lines[0], "Invalid input");
}

#[tokio::test]
async fn test_unknown_os_flag_is_invalid_input() {
    let mut t = TestShell::new();
    let lines = t.run_lines("os --bogus").await;
    assert_eq!(lines, vec!["Invalid input".to_string(), t.location()]);

    let lines = t.run_lines("os").await;
    assert_eq!(lines, vec!["Invalid input".to_string(), t.location()]);
}

#[tokio::test]
async fn test_os_architecture_and_eol() {
    let mut t = TestShell::new();
    let lines = t.run_lines("os --architecture").await;
    let arch = arch_name(std::env::consts::ARCH);
    assert_eq!(lines, vec![arch.to_string(), t.location()]);
    #[cfg(target_arch = "x86_64")]
    assert_eq!(arch, "x64");

    #[cfg(unix)]
    {
        let lines = t.run_lines("os --EOL").await;
        assert_eq!(lines, vec!["\"\\n\"".to_string(), t.location()]);
    }
}

#[tokio::test]
async fn test_os_cpus_starts_with_total() {
    let mut t = TestShell::new();
    let lines = t.run_lines("os --cpus").await;
    assert!(lines[0].starts_with("Total CPUs: "), "{:?}", lines);
    assert_eq!(lines.last(), Some(&t.location()));
}

#[tokio::test]
async fn test_failures_never_stop_the_loop() {
    let mut t = TestShell::new();
    for line in ["bogus", "cat missing.txt", "cd missing", "rm missing.txt", "os --nope"] {
        assert_eq!(t.run(line).await, Flow::Continue, "{}", line);
        assert_eq!(t.shell.state(), ShellState::AwaitingLine);
    }

    let lines = t.lines();
    let failures = lines
        .iter()
        .filter(|l| *l == "Operation failed" || *l == "Invalid input")
        .count();
    assert_eq!(failures, 5);
}

#[tokio::test]
async fn test_cat_of_directory_fails() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    let lines = t.run_lines("cat sub").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
}

#[tokio::test]
async fn test_rm_of_directory_fails() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    let lines = t.run_lines("rm sub").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
    assert!(t.path("sub").is_dir());
}

#[tokio::test]
async fn test_decompress_of_plain_text_fails() {
    let mut t = TestShell::new();
    write_file(t.root(), "plain.txt", b"this was never brotli encoded");

    let lines = t.run_lines("decompress plain.txt out.txt").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
}

#[tokio::test]
async fn test_compress_onto_itself_is_refused() {
    let mut t = TestShell::new();
    write_file(t.root(), "data.txt", b"precious");

    let lines = t.run_lines("compress data.txt data.txt").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
    assert_eq!(std::fs::read(t.path("data.txt")).unwrap(), b"precious");
}

/// A symlink back to the cursor makes source and destination one file
#[cfg(unix)]
#[tokio::test]
async fn test_cp_and_compress_through_symlink_keep_source() {
    let mut t = TestShell::new();
    write_file(t.root(), "a.txt", b"alpha");
    write_file(t.root(), "b.txt", b"bravo");
    std::os::unix::fs::symlink(t.root(), t.path("link")).unwrap();

    let lines = t.run_lines("cp a.txt link").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
    assert_eq!(std::fs::read(t.path("a.txt")).unwrap(), b"alpha");

    let lines = t.run_lines("compress b.txt link/b.txt").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
    assert_eq!(std::fs::read(t.path("b.txt")).unwrap(), b"bravo");
}

#[tokio::test]
async fn test_cp_missing_source_creates_nothing() {
    let mut t = TestShell::new();
    std::fs::create_dir(t.path("sub")).unwrap();

    t.run("cp ghost.txt sub").await;
    assert!(!t.path("sub/ghost.txt").exists());
}

#[tokio::test]
async fn test_mv_with_failed_copy_keeps_source() {
    let mut t = TestShell::new();
    write_file(t.root(), "a.txt", b"stay");

    let lines = t.run_lines("mv a.txt missing-dir").await;
    assert_eq!(lines, vec![t.location(), "Operation failed".to_string()]);
    assert!(t.path("a.txt").exists());
}

/// Copy succeeds, delete fails: both messages, both files
#[cfg(unix)]
#[tokio::test]
async fn test_mv_reports_delete_failure_separately() {
    use std::os::unix::fs::PermissionsExt;

    // Permission bits do not stop root
    if nix::unistd::Uid::effective().is_root() {
        return;
    }

    let mut t = TestShell::new();
    std::fs::create_dir(t.path("locked")).unwrap();
    std::fs::create_dir(t.path("dest")).unwrap();
    write_file(&t.path("locked"), "a.txt", b"half moved");
    std::fs::set_permissions(t.path("locked"), std::fs::Permissions::from_mode(0o555)).unwrap();

    let lines = t.run_lines("mv locked/a.txt dest").await;

    std::fs::set_permissions(t.path("locked"), std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(
        lines,
        vec![
            t.location(),
            messages::FILE_COPIED.to_string(),
            "Operation failed".to_string(),
        ]
    );
    assert!(t.path("locked/a.txt").exists());
    assert_eq!(std::fs::read(t.path("dest/a.txt")).unwrap(), b"half moved");
}
