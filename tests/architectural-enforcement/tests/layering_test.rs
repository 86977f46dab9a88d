//! Integration Test: Headless Core
//!
//! **Policy**: `botmatata-core` knows nothing about terminals. Surfaces
//! depend on the core, never the reverse, and the animation path does no
//! I/O of its own.

use std::fs;

use architectural_enforcement::{find_patterns, report, rust_sources, workspace_root};

/// Modules that run on every timer tick
const ANIMATION_PATH: &[&str] = &[
    "animator.rs",
    "sequencer.rs",
    "state.rs",
    "script.rs",
    "timing.rs",
    "timers.rs",
    "timeline.rs",
];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core").join("Cargo.toml")).unwrap();
    for forbidden in ["ratatui", "crossterm", "botmatata-tui"] {
        assert!(
            !manifest.contains(forbidden),
            "core/Cargo.toml must not depend on {forbidden}"
        );
    }
}

#[test]
fn test_core_sources_do_not_import_ui_crates() {
    let files = rust_sources(&workspace_root().join("core").join("src"));
    let violations = find_patterns(&files, &["ratatui", "crossterm", "botmatata_tui"]);
    report("UI crate referenced from botmatata-core", &violations);
}

#[test]
fn test_core_never_prints() {
    let files = rust_sources(&workspace_root().join("core").join("src"));
    let violations = find_patterns(&files, &["println!", "eprintln!", "print!(", "dbg!("]);
    report("Console output in botmatata-core (use tracing)", &violations);
}

#[test]
fn test_animation_path_does_no_io() {
    let src = workspace_root().join("core").join("src");
    let files: Vec<_> = ANIMATION_PATH.iter().map(|f| src.join(f)).collect();
    assert!(files.iter().all(|f| f.exists()), "animation path modules moved");

    let violations = find_patterns(&files, &["std::fs", "std::io", "std::net", "tokio::fs"]);
    report("I/O in the animation path", &violations);
}

#[test]
fn test_tui_depends_on_core() {
    let manifest = fs::read_to_string(workspace_root().join("tui").join("Cargo.toml")).unwrap();
    assert!(manifest.contains("botmatata-core"));
}

#[test]
fn test_config_has_single_loading_path() {
    let config = workspace_root()
        .join("core")
        .join("src")
        .join("config")
        .join("mod.rs");
    let loaders: Vec<String> = find_patterns(&[config], &["pub fn load_config"])
        .into_iter()
        .map(|v| v.text)
        .collect();

    assert_eq!(loaders.len(), 2, "unexpected config loaders: {loaders:?}");
    assert!(loaders[0].starts_with("pub fn load_config("));
    assert!(loaders[1].starts_with("pub fn load_config_with_env<"));
}
