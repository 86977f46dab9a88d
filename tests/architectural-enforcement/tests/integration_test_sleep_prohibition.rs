//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code never sleeps for a duration.
//! - The chat animator waits on absolute deadlines (`sleep_until`) inside
//!   its timer units, and only there
//! - The TUI paces frames with `tokio::time::interval`
//! - Nothing blocks a thread with `std::thread::sleep`

use architectural_enforcement::{find_patterns, report, rust_sources, workspace_root};

#[test]
fn test_no_thread_sleep_anywhere() {
    let root = workspace_root();
    let mut files = rust_sources(&root.join("core").join("src"));
    files.extend(rust_sources(&root.join("tui").join("src")));

    let violations = find_patterns(&files, &["thread::sleep("]);
    report("Blocking thread sleep in production code", &violations);
}

#[test]
fn test_no_duration_sleep_in_production_code() {
    let root = workspace_root();
    let mut files = rust_sources(&root.join("core").join("src"));
    files.extend(rust_sources(&root.join("tui").join("src")));

    let violations = find_patterns(&files, &["::sleep(", ".sleep("]);
    report(
        "Duration sleep in production code (use deadlines or interval ticks)",
        &violations,
    );
}

#[test]
fn test_deadline_waits_only_in_animator() {
    let root = workspace_root();
    let animator = root.join("core").join("src").join("animator.rs");
    let mut files = rust_sources(&root.join("core").join("src"));
    files.extend(rust_sources(&root.join("tui").join("src")));
    files.retain(|f| f != &animator);

    let violations = find_patterns(&files, &["sleep_until("]);
    report("Deadline wait outside the chat animator", &violations);

    let in_animator = find_patterns(&[animator], &["sleep_until("]);
    assert_eq!(in_animator.len(), 1, "the animator has exactly one timer unit");
}

#[test]
fn test_tui_frames_use_interval() {
    let app = workspace_root().join("tui").join("src").join("app.rs");
    let hits = find_patterns(&[app], &["tokio::time::interval("]);
    assert!(!hits.is_empty(), "the TUI event loop paces frames with an interval");
}
