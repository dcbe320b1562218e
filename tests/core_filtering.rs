// tests/core_filtering.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use texwatch::engine::{CoreRuntime, Decision, IgnoreReason, RuntimeEvent};
use texwatch::fs::mock::MockFileSystem;
use texwatch::watch::{Debouncer, FileEvent, WatchTarget};

const TARGET: &str = "/watch/latexPredict.png";

fn core_with(fs: &MockFileSystem, target: &str) -> CoreRuntime {
    fs.add_dir("/watch");
    let target = WatchTarget::with_fs(target, fs).expect("valid target");
    CoreRuntime::new(
        target,
        Debouncer::new(Duration::from_secs(1)),
        Arc::new(fs.clone()),
    )
}

fn modified(path: &str) -> RuntimeEvent {
    RuntimeEvent::FileChanged(FileEvent::Modified(PathBuf::from(path)))
}

#[test]
fn change_to_target_dispatches_target_path() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs(TARGET, 100.0);

    let step = core.step(modified(TARGET));

    assert!(step.keep_running);
    assert_eq!(step.dispatch_path(), Some(&PathBuf::from(TARGET)));
}

#[test]
fn other_file_in_same_directory_is_ignored() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs("/watch/other.png", 100.0);

    let step = core.step(modified("/watch/other.png"));

    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::OtherPath)));
    assert_eq!(core.debouncer().last(), None);
}

#[test]
fn sibling_with_target_as_prefix_is_ignored() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs("/watch/latexPredict.png.tmp", 100.0);

    let step = core.step(modified("/watch/latexPredict.png.tmp"));

    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::OtherPath)));
}

#[test]
fn atomic_replace_counts_via_move_destination() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs(TARGET, 100.0);

    let step = core.step(RuntimeEvent::FileChanged(FileEvent::Moved {
        from: Some(PathBuf::from("/watch/.latexPredict.png.partial")),
        to: PathBuf::from(TARGET),
    }));

    assert_eq!(step.dispatch_path(), Some(&PathBuf::from(TARGET)));
}

#[test]
fn move_away_from_target_is_ignored() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs("/watch/renamed.png", 100.0);

    let step = core.step(RuntimeEvent::FileChanged(FileEvent::Moved {
        from: Some(PathBuf::from(TARGET)),
        to: PathBuf::from("/watch/renamed.png"),
    }));

    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::OtherPath)));
}

#[test]
fn vanished_target_is_skipped_silently() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);

    let step = core.step(modified(TARGET));

    assert!(step.keep_running);
    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::Missing)));
    assert_eq!(core.debouncer().last(), None);
}

#[test]
fn directory_at_target_path_is_ignored() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.add_dir(TARGET);

    let step = core.step(RuntimeEvent::FileChanged(FileEvent::Created(PathBuf::from(
        TARGET,
    ))));

    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::Directory)));
}

#[test]
fn burst_of_events_for_one_save_dispatches_once() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs(TARGET, 100.0);

    let events = vec![
        RuntimeEvent::FileChanged(FileEvent::Created(PathBuf::from(TARGET))),
        modified(TARGET),
        modified(TARGET),
        modified(TARGET),
    ];

    let dispatched = events
        .into_iter()
        .filter(|e| core.step(e.clone()).dispatch_path().is_some())
        .count();

    assert_eq!(dispatched, 1);
}

#[test]
fn saves_spaced_past_the_window_each_dispatch() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);

    let mut dispatched = 0;
    for secs in [0.0, 0.5, 1.2, 1.4, 5.0] {
        fs.set_file_secs(TARGET, 1_000.0 + secs);
        if core.step(modified(TARGET)).dispatch_path().is_some() {
            dispatched += 1;
        }
    }

    // 0.0, 1.2 and 5.0
    assert_eq!(dispatched, 3);
}

#[test]
fn relative_and_dotted_target_paths_are_normalized() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, "/watch/sub/../latexPredict.png");
    fs.set_file_secs(TARGET, 100.0);

    assert_eq!(core.target().path(), Path::new(TARGET));
    assert_eq!(core.target().dir(), Path::new("/watch"));

    let step = core.step(modified("/watch/./latexPredict.png"));
    assert!(step.dispatch_path().is_some());
}

#[test]
fn shutdown_stops_without_decision() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);

    let step = core.step(RuntimeEvent::ShutdownRequested);

    assert!(!step.keep_running);
    assert_eq!(step.decision, None);
}

#[test]
fn target_without_file_name_is_rejected() {
    let fs = MockFileSystem::new();
    assert!(WatchTarget::with_fs("/", &fs).is_err());
}

#[test]
fn target_deleted_after_a_dispatch_keeps_the_last_mtime() {
    let fs = MockFileSystem::new();
    let mut core = core_with(&fs, TARGET);
    fs.set_file_secs(TARGET, 100.0);

    assert!(core.step(modified(TARGET)).dispatch_path().is_some());
    let last = core.debouncer().last();
    assert!(last.is_some());

    fs.remove(TARGET);
    let step = core.step(modified(TARGET));

    assert_eq!(step.decision, Some(Decision::Ignore(IgnoreReason::Missing)));
    assert_eq!(core.debouncer().last(), last);
}
