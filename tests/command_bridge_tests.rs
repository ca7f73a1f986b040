//! Clipboard bridge tests using shell commands in place of real clipboard tools
#![cfg(unix)]

use std::path::Path;

use pbserver::application::ports::{ClipboardBridge, ClipboardError};
use pbserver::domain::clipboard::ClipboardCommand;
use pbserver::domain::duration::Duration;
use pbserver::infrastructure::CommandClipboard;

/// Copy/paste pair that stores the clipboard in `store`
fn file_clipboard(store: &Path) -> CommandClipboard {
    let path = store.display().to_string();
    CommandClipboard::new(
        ClipboardCommand::new("sh", ["-c".to_string(), format!("cat > '{}'", path)]),
        ClipboardCommand::new("sh", ["-c".to_string(), format!("cat '{}'", path)]),
    )
}

#[tokio::test]
async fn write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = file_clipboard(&dir.path().join("clipboard"));

    let mut input: &[u8] = b"hello\nworld";
    bridge.write(&mut input).await.unwrap();

    let mut out = Vec::new();
    bridge.read(&mut out).await.unwrap();
    assert_eq!(out, b"hello\nworld");
}

#[tokio::test]
async fn empty_write_clears_clipboard() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = file_clipboard(&dir.path().join("clipboard"));

    let mut input: &[u8] = b"something";
    bridge.write(&mut input).await.unwrap();
    let mut empty: &[u8] = b"";
    bridge.write(&mut empty).await.unwrap();

    let mut out = Vec::new();
    bridge.read(&mut out).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn copy_program_that_stops_reading_early_succeeds() {
    let bridge = CommandClipboard::new(
        ClipboardCommand::new("sh", ["-c", "head -c 1 >/dev/null"]),
        ClipboardCommand::bare("true"),
    );

    let body = vec![b'x'; 4 * 1024 * 1024];
    let mut input: &[u8] = &body;
    bridge.write(&mut input).await.unwrap();
}

#[tokio::test]
async fn copy_program_that_fails_early_is_reported() {
    let bridge = CommandClipboard::new(
        ClipboardCommand::new("sh", ["-c", "head -c 1 >/dev/null; exit 4"]),
        ClipboardCommand::bare("true"),
    );

    let body = vec![b'x'; 4 * 1024 * 1024];
    let mut input: &[u8] = &body;
    let err = bridge.write(&mut input).await.unwrap_err();
    assert!(matches!(err, ClipboardError::ExitFailure { .. }), "got: {:?}", err);
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_stderr() {
    let failing = ClipboardCommand::new("sh", ["-c", "echo 'no display' >&2; exit 3"]);
    let bridge = CommandClipboard::new(failing.clone(), failing);

    let mut out = Vec::new();
    let err = bridge.read(&mut out).await.unwrap_err();
    match err {
        ClipboardError::ExitFailure { program, stderr, .. } => {
            assert_eq!(program, "sh");
            assert!(stderr.contains("no display"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn slow_program_is_killed_after_timeout() {
    let bridge = CommandClipboard::new(
        ClipboardCommand::new("sleep", ["5"]),
        ClipboardCommand::new("sleep", ["5"]),
    )
    .with_timeout(Some(Duration::from_millis(200)));

    let started = std::time::Instant::now();
    let mut out = Vec::new();
    let err = bridge.read(&mut out).await.unwrap_err();

    assert!(matches!(err, ClipboardError::TimedOut { ref program, .. } if program == "sleep"));
    assert!(started.elapsed() < std::time::Duration::from_secs(4));
}
