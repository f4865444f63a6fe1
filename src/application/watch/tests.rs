//! Tests for the watch module

use super::cache::{compute_content_hash, ContentHashes};
use super::event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
use super::use_case::WatchUseCase;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

use crate::application::compiler::{Orchestrator, OrchestratorOptions};
use crate::config::{CompilationConfig, Preferences};
use crate::domain::ports::asset_sink::recording::RecordingAssetSink;
use crate::domain::ports::compiler_runner::fake::FakeCompiler;
use crate::domain::ports::config_store::mock::MockConfigStore;
use crate::domain::value_objects::{IgnorePatterns, IGNORE_FILE_NAME};

type TestOrchestrator = Orchestrator<MockConfigStore, FakeCompiler, RecordingAssetSink>;

fn orchestrator(root: &Path, runner: FakeCompiler) -> TestOrchestrator {
    let mut config = CompilationConfig::default();
    config.go.enabled = true;
    let prefs = Preferences {
        protoc: Some(PathBuf::from("protoc")),
        ..Preferences::default()
    };
    let ignore =
        IgnorePatterns::from_content(root, &root.join(IGNORE_FILE_NAME), "vendor/\n").unwrap();
    Orchestrator::new(
        OrchestratorOptions::new(root)
            .with_preferences(prefs)
            .with_ignore(ignore),
        MockConfigStore::new().with_project_wide(config),
        runner,
        RecordingAssetSink::default(),
    )
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "syntax = \"proto3\";\n").unwrap();
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        source: "/project/Assets".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"source\":\"/project/Assets\""));
    assert!(json.contains("\"command\":\"watch\""));
}

#[test]
fn test_watch_event_to_json_compile_complete() {
    let event = WatchEvent::CompileComplete {
        compiled: 3,
        failed: 1,
        skipped: 2,
        changed: true,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"compile_complete\""));
    assert!(json.contains("\"compiled\":3"));
    assert!(json.contains("\"failed\":1"));
    assert!(json.contains("\"skipped\":2"));
    assert!(json.contains("\"changed\":true"));
}

#[test]
fn test_watch_event_to_json_error() {
    let event = WatchEvent::Error {
        message: "Expected \";\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"error\""));
    assert!(json.contains("\\\";\\\""));
}

#[test]
fn test_watch_event_to_json_shutdown() {
    let value: serde_json::Value = serde_json::from_str(&WatchEvent::Shutdown.to_json()).unwrap();
    assert_eq!(value, serde_json::json!({"event": "shutdown", "command": "watch"}));
}

// === WatcherState tests ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::new();
    assert!(!state.should_compile());

    state.add_change(PathBuf::from("a.proto"));
    assert!(!state.should_compile());
    assert!(state.has_pending());

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_compile());

    let changes = state.take_changes();
    assert_eq!(changes.len(), 1);
    assert!(!state.should_compile());
    assert!(!state.has_pending());
}

#[test]
fn test_watcher_state_coalesces_and_sorts() {
    let mut state = WatcherState::new();
    state.add_change(PathBuf::from("c.proto"));
    state.add_change(PathBuf::from("a.proto"));
    state.add_change(PathBuf::from("c.proto"));

    let changes = state.take_changes();

    assert_eq!(
        changes,
        vec![PathBuf::from("a.proto"), PathBuf::from("c.proto")]
    );
}

// === ContentHashes tests ===

#[test]
fn test_compute_content_hash() {
    let hash1 = compute_content_hash(b"message A {}");
    let hash2 = compute_content_hash(b"message A {}");
    let hash3 = compute_content_hash(b"message B {}");

    assert_eq!(hash1, hash2);
    assert_ne!(hash1, hash3);
    assert!(hash1.starts_with("sha256:"));
    assert_eq!(hash1.len(), 7 + 64);
}

#[test]
fn test_content_hashes_detect_real_changes_only() {
    let mut hashes = ContentHashes::new();
    let path = Path::new("/p/a.proto");

    assert!(hashes.record(path, b"v1"));
    assert!(!hashes.record(path, b"v1"));
    assert!(hashes.record(path, b"v2"));

    hashes.remove(path);
    assert!(hashes.record(path, b"v2"));
}

#[test]
fn test_content_hashes_seed_skips_missing() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("a.proto");
    touch(&present);

    let mut hashes = ContentHashes::seed(&[present.clone(), dir.path().join("gone.proto")]);

    assert_eq!(hashes.len(), 1);
    assert!(!hashes.record(&present, b"syntax = \"proto3\";\n"));
}

// === WatchUseCase tests ===

#[test]
fn test_is_watched_filters_paths() {
    let dir = tempdir().unwrap();
    let orch = orchestrator(dir.path(), FakeCompiler::new());
    let use_case = WatchUseCase::new(&orch, WatchOptions::new());

    assert!(use_case.is_watched(&dir.path().join("a/msg.proto")));
    assert!(!use_case.is_watched(&dir.path().join("a/msg.pb.go")));
    assert!(!use_case.is_watched(&dir.path().join("vendor/x.proto")));
    assert!(!use_case.is_watched(Path::new("/elsewhere/x.proto")));
}

#[test]
fn test_compile_batch_emits_events() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("a/msg.proto");
    touch(&source);
    let orch = orchestrator(dir.path(), FakeCompiler::new().writing("msg.pb.go", ""));
    let use_case = WatchUseCase::new(&orch, WatchOptions::new());
    let events = Mutex::new(Vec::new());

    let report = use_case.compile_batch(&[source], &|e| events.lock().unwrap().push(e));

    assert!(report.changed_any);
    assert_eq!(
        events.into_inner().unwrap(),
        vec![
            WatchEvent::CompileStarted { files: 1 },
            WatchEvent::CompileComplete {
                compiled: 1,
                failed: 0,
                skipped: 0,
                changed: true,
            },
        ]
    );
    assert_eq!(orch.sink().refresh_count(), 1);
}

#[test]
fn test_compile_batch_reports_diagnostics() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("a/msg.proto");
    touch(&source);
    let orch = orchestrator(
        dir.path(),
        FakeCompiler::new().failing_for("--go_out", "msg.proto:1:1: bad\n"),
    );
    let use_case = WatchUseCase::new(&orch, WatchOptions::new());
    let events = Mutex::new(Vec::new());

    use_case.compile_batch(&[source.clone()], &|e| events.lock().unwrap().push(e));

    let events = events.into_inner().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        WatchEvent::Error {
            message: format!("{} (Go): msg.proto:1:1: bad", source.display()),
        }
    );
    assert!(matches!(
        events[2],
        WatchEvent::CompileComplete { failed: 1, .. }
    ));
}

#[test]
fn test_watch_stops_when_not_running() {
    let dir = tempdir().unwrap();
    let orch = orchestrator(dir.path(), FakeCompiler::new());
    let use_case = WatchUseCase::new(&orch, WatchOptions::new());

    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let running = Arc::new(AtomicBool::new(false));

    use_case
        .start(running, |event| {
            events_clone.lock().unwrap().push(event.to_json());
        })
        .unwrap();

    let captured = events.lock().unwrap();
    assert!(captured[0].contains("watch_started"));
    assert!(captured.last().unwrap().contains("shutdown"));
}

#[test]
fn test_watch_build_on_start() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("a/msg.proto"));
    let orch = orchestrator(dir.path(), FakeCompiler::new());
    let use_case = WatchUseCase::new(&orch, WatchOptions::new().with_build_on_start(true));
    let events = Mutex::new(Vec::new());

    use_case
        .start(Arc::new(AtomicBool::new(false)), |e| {
            events.lock().unwrap().push(e)
        })
        .unwrap();

    let events = events.into_inner().unwrap();
    assert!(events.contains(&WatchEvent::CompileComplete {
        compiled: 1,
        failed: 0,
        skipped: 0,
        changed: false,
    }));
    assert_eq!(orch.runner.call_count(), 1);
}
