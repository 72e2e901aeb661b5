//! Snapshot persistence through the public API: round trips, overwrite semantics,
//! and the tracker's save policy.

use std::fs;

use dyldtrack::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn record(event: ImageEvent, path: &str, base: usize) -> ImageRecord {
    ImageRecord::new(
        event,
        &ResolvedImage {
            path: Some(path.to_string()),
            base,
        },
        0x4000,
        uuid::Uuid::nil(),
    )
}

#[test]
fn persist_then_load_last_round_trips_textually() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Log.json");

    let log = EventLog::new();
    log.append(record(ImageEvent::Added, "/usr/lib/liba.dylib", 0x1000));
    log.append(record(ImageEvent::Added, "/usr/lib/libb.dylib", 0x2000));
    log.append(record(ImageEvent::Removed, "/usr/lib/liba.dylib", 0x1000));

    let before: Vec<String> = log.snapshot().iter().map(ToString::to_string).collect();
    log.persist(&path).unwrap();

    assert_eq!(EventLog::load_last(&path).unwrap(), before);
}

#[test]
fn save_overwrites_the_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Log.json");

    let log = EventLog::new();
    log.append(record(ImageEvent::Added, "/usr/lib/liba.dylib", 1));
    log.persist(&path).unwrap();
    let first_len = fs::metadata(&path).unwrap().len();

    log.append(record(ImageEvent::Added, "/usr/lib/libb.dylib", 2));
    log.persist(&path).unwrap();

    let reloaded = EventLog::load_last(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert!(fs::metadata(&path).unwrap().len() > first_len);
}

#[test]
fn load_last_is_none_for_absent_or_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();

    assert!(EventLog::load_last(&dir.path().join("never-written.json")).is_none());

    let corrupt = dir.path().join("corrupt.json");
    fs::write(&corrupt, b"\x00\x01 not a snapshot").unwrap();
    assert!(EventLog::load_last(&corrupt).is_none());
}

#[test]
fn tracker_save_writes_the_global_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Log.json");

    let tracker = LoadTracker::with_log_path(&path);
    tracker.save().unwrap();

    // Whatever the global log holds on this platform, the snapshot parses back.
    let lines = EventLog::load_last(&path).unwrap();
    assert_eq!(lines.len(), tracker.log().len());
}

#[test]
fn background_notification_persists_best_effort() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Log.json");

    let tracker = LoadTracker::with_log_path(&path);
    tracker.entered_background();
    assert!(path.exists());

    // A failing path is non-fatal; the notification must never raise.
    let broken = LoadTracker::with_log_path("/nonexistent-dir/deep/Log.json");
    broken.entered_background();
    // Drop of `broken` retries the save and must stay non-fatal too.
}
