// 手动捕获与保存为 Obsidian 笔记
mod common;

use std::sync::atomic::Ordering;

use chrono::NaiveDateTime;
use common::harness;
use clipboard_toolbar::capture::CaptureOutcome;
use clipboard_toolbar::ports::SaveMode;

#[tokio::test]
async fn manual_capture_saves_clipboard_text() {
    let h = harness();
    h.clipboard.set_text("Meeting notes");

    assert_eq!(h.toolbar.manual_capture().await, CaptureOutcome::Saved);

    let requests = h.saver.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.content, "Meeting notes");
    assert_eq!(request.folder_path, "/");
    assert_eq!(request.destination, "");
    assert_eq!(request.mode, SaveMode::Create);

    let stamp = request.title.strip_prefix("Clipboard ").unwrap();
    assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H-%M-%S").is_ok());
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn first_configured_vault_is_destination() {
    let h = harness();
    h.settings.set_vaults(&["Work", "Personal"]);
    h.clipboard.set_text("todo");

    h.toolbar.manual_capture().await;
    assert_eq!(h.saver.requests()[0].destination, "Work");
}

#[tokio::test]
async fn empty_clipboard_shows_notice() {
    let h = harness();
    h.clipboard.set_text("");

    assert_eq!(
        h.toolbar.manual_capture().await,
        CaptureOutcome::EmptyClipboard
    );
    assert!(h.saver.requests().is_empty());
    assert_eq!(h.notifier.notices(), vec!["Clipboard is empty".to_string()]);
}

#[tokio::test]
async fn read_failure_shows_reason() {
    let h = harness();
    h.clipboard.fail("Document is not focused");

    assert_eq!(h.toolbar.manual_capture().await, CaptureOutcome::ReadFailed);
    assert!(h.saver.requests().is_empty());
    assert_eq!(
        h.notifier.notices(),
        vec!["Failed to read clipboard: Document is not focused".to_string()]
    );
}

#[tokio::test]
async fn save_failure_shows_notice() {
    let h = harness();
    h.saver.fail.store(true, Ordering::SeqCst);
    h.clipboard.set_text("draft");

    assert_eq!(h.toolbar.manual_capture().await, CaptureOutcome::SaveFailed);
    assert_eq!(
        h.notifier.notices(),
        vec!["Failed to save to Obsidian".to_string()]
    );
}

#[tokio::test]
async fn unreadable_settings_abort_save() {
    let h = harness();
    h.settings.fail.store(true, Ordering::SeqCst);

    assert_eq!(
        h.toolbar.capture().perform_save("draft").await,
        CaptureOutcome::SaveFailed
    );
    assert!(h.saver.requests().is_empty());
    assert_eq!(
        h.notifier.notices(),
        vec!["Failed to save to Obsidian".to_string()]
    );
}

#[tokio::test]
async fn whitespace_only_text_is_saved() {
    let h = harness();
    h.clipboard.set_text("   ");

    assert_eq!(h.toolbar.manual_capture().await, CaptureOutcome::Saved);
    assert_eq!(h.saver.requests()[0].content, "   ");
}
