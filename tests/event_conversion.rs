// tests/event_conversion.rs

use std::path::PathBuf;

use notify::event::{
    AccessKind, CreateKind, DataChange, EventKind, ModifyKind, RemoveKind, RenameMode,
};
use notify::Event;
use texwatch::watch::FileEvent;

fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn file_creation_and_writes_are_kept() {
    let created = Event::new(EventKind::Create(CreateKind::File)).add_path(p("/tmp/a.png"));
    assert_eq!(FileEvent::from_notify(&created), vec![FileEvent::Created(p("/tmp/a.png"))]);

    let written = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
        .add_path(p("/tmp/a.png"));
    assert_eq!(FileEvent::from_notify(&written), vec![FileEvent::Modified(p("/tmp/a.png"))]);
}

#[test]
fn folder_creation_is_dropped() {
    let ev = Event::new(EventKind::Create(CreateKind::Folder)).add_path(p("/tmp/a.png"));
    assert!(FileEvent::from_notify(&ev).is_empty());
}

#[test]
fn paired_rename_becomes_one_move_to_destination() {
    let ev = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        .add_path(p("/tmp/.a.png.part"))
        .add_path(p("/tmp/a.png"));

    let events = FileEvent::from_notify(&ev);

    assert_eq!(
        events,
        vec![FileEvent::Moved {
            from: Some(p("/tmp/.a.png.part")),
            to: p("/tmp/a.png"),
        }]
    );
    assert_eq!(events[0].path(), p("/tmp/a.png"));
    assert_eq!(events[0].kind_str(), "moved");
}

#[test]
fn rename_halves_keep_only_the_destination() {
    let from = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
        .add_path(p("/tmp/a.png"));
    assert!(FileEvent::from_notify(&from).is_empty());

    let to = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
        .add_path(p("/tmp/a.png"));
    assert_eq!(
        FileEvent::from_notify(&to),
        vec![FileEvent::Moved { from: None, to: p("/tmp/a.png") }]
    );
}

#[test]
fn removals_and_accesses_are_dropped() {
    let kinds = [
        EventKind::Remove(RemoveKind::File),
        EventKind::Access(AccessKind::Any),
        EventKind::Any,
        EventKind::Other,
    ];
    for kind in kinds {
        let ev = Event::new(kind.clone()).add_path(p("/tmp/a.png"));
        assert!(FileEvent::from_notify(&ev).is_empty(), "{kind:?} should be dropped");
    }
}
