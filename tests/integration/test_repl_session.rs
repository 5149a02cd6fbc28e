//! Integration Tests for the REPL Session
//!
//! Runs whole sessions over in-memory input and checks the transcript.

use std::path::Path;

use fmshell::output::{self, messages, Output};
use fmshell::{CloseReason, Config, Platform, Session, Shell};

type Events = tokio::sync::mpsc::UnboundedReceiver<output::OutputEvent>;

fn shell_in(dir: &Path, username: &str) -> (Shell, Events) {
    let (output, rx) = Output::channel();
    let session = Session::new(username, dir).unwrap();
    let shell = Shell::new(Config::default(), session, output, Platform::system());
    (shell, rx)
}

/// Run a full session over `input` and return (close reason, transcript)
async fn transcript(dir: &Path, input: &[u8]) -> (CloseReason, String) {
    let (shell, rx) = shell_in(dir, "tester");
    let reason = shell.run(input).await;

    // The shell is gone, so the printer drains the backlog and stops
    let mut sink = Vec::new();
    output::run_printer(rx, &mut sink).await.unwrap();
    (reason, String::from_utf8(sink).unwrap())
}

#[tokio::test]
async fn test_exit_prints_farewell_without_cursor_line() {
    let dir = tempfile::tempdir().unwrap();
    let (reason, text) = transcript(dir.path(), b".exit\n").await;

    assert_eq!(reason, CloseReason::ExitCommand);
    assert_eq!(
        text,
        format!(
            "{}\n{}\n> {}\n",
            messages::welcome("tester"),
            messages::location(dir.path()),
            messages::farewell("tester"),
        )
    );
}

#[tokio::test]
async fn test_end_of_input_closes_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let (reason, text) = transcript(dir.path(), b"").await;

    assert_eq!(reason, CloseReason::EndOfInput);
    assert!(text.starts_with("Welcome to the File Manager, tester!\n"));
    assert!(text.ends_with("Thank you for using File Manager, tester, goodbye!\n"));
}

#[tokio::test]
async fn test_lines_after_exit_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (reason, _) = transcript(dir.path(), b".exit\nadd never.txt\n").await;

    assert_eq!(reason, CloseReason::ExitCommand);
    assert!(!dir.path().join("never.txt").exists());
}

#[tokio::test]
async fn test_pending_operations_finish_before_farewell() {
    let dir = tempfile::tempdir().unwrap();
    let (shell, rx) = shell_in(dir.path(), "tester");

    let reason = shell.run(&b"add made.txt\nhash made.txt\n"[..]).await;
    assert_eq!(reason, CloseReason::EndOfInput);
    assert!(dir.path().join("made.txt").is_file());

    let mut sink = Vec::new();
    output::run_printer(rx, &mut sink).await.unwrap();
    let text = String::from_utf8(sink).unwrap();
    assert!(text.ends_with(&format!("{}\n", messages::farewell("tester"))));
}

#[tokio::test]
async fn test_interrupt_closes_with_farewell() {
    let dir = tempfile::tempdir().unwrap();
    let (shell, rx) = shell_in(dir.path(), "tester");

    // Input stays open; only the shutdown future can end the session
    let (_keep_open, reader) = tokio::io::duplex(64);
    let reason = shell
        .run_until(tokio::io::BufReader::new(reader), async {})
        .await;
    assert_eq!(reason, CloseReason::Interrupted);

    let mut sink = Vec::new();
    output::run_printer(rx, &mut sink).await.unwrap();
    let text = String::from_utf8(sink).unwrap();
    assert!(text.ends_with(&format!("{}\n", messages::farewell("tester"))));
}

#[tokio::test]
async fn test_commands_in_session_report_in_transcript() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("note.txt"), b"remember").unwrap();
    let (reason, text) = transcript(dir.path(), b"cat note.txt\nbogus\n.exit\n").await;

    assert_eq!(reason, CloseReason::ExitCommand);
    assert!(text.contains("remember\n"));
    assert!(text.contains("Invalid input\n"));
    assert!(text.ends_with(&format!("{}\n", messages::farewell("tester"))));
}
