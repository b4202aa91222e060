//! Tests for room change notification.

use noughts_arena::{
    ArenaConfig, BroadcastNotifier, MemoryRecorder, MemoryRoomStore, RoomService, RoomStatus,
    RoomView,
};
use std::sync::Arc;

fn service(notifier: &BroadcastNotifier) -> RoomService {
    RoomService::new(
        Arc::new(MemoryRoomStore::new()),
        Arc::new(notifier.clone()),
        Arc::new(MemoryRecorder::new()),
        ArenaConfig::default(),
    )
}

#[tokio::test]
async fn test_every_write_is_published_in_order() {
    let notifier = BroadcastNotifier::default();
    let mut receiver = notifier.subscribe();
    let service = service(&notifier);

    let room = service.create_room("alice").expect("Create failed");
    let code = room.code().to_string();
    service.join_room(&code, "bob").expect("Join failed");
    service.play_move(&code, "alice", 4).expect("Move failed");

    let mut versions = Vec::new();
    for _ in 0..3 {
        let snapshot = receiver.recv().await.expect("Snapshot missing");
        assert_eq!(snapshot.code(), room.code());
        versions.push(*snapshot.version());
    }
    assert_eq!(versions, vec![0, 1, 2]);
}

#[test]
fn test_rejected_writes_are_not_published() {
    let notifier = BroadcastNotifier::default();
    let service = service(&notifier);
    let room = service.create_room("alice").expect("Create failed");
    let code = room.code().to_string();
    service.join_room(&code, "bob").expect("Join failed");

    let mut receiver = notifier.subscribe();
    assert!(service.play_move(&code, "bob", 4).is_err());
    assert!(receiver.try_recv().is_err());
}

#[test]
fn test_view_ignores_redelivered_and_stale_snapshots() {
    let notifier = BroadcastNotifier::default();
    let mut receiver = notifier.subscribe();
    let service = service(&notifier);

    let room = service.create_room("alice").expect("Create failed");
    let code = room.code().to_string();
    service.join_room(&code, "bob").expect("Join failed");

    let created = receiver.try_recv().expect("Create snapshot missing");
    let joined = receiver.try_recv().expect("Join snapshot missing");

    let mut view = RoomView::new(room.code().clone());
    assert!(view.apply(&created));
    assert!(view.apply(&joined));
    assert!(!view.apply(&joined));
    assert!(!view.apply(&created));

    let latest = view.latest().expect("View empty");
    assert_eq!(*latest.status(), RoomStatus::Playing);
    assert_eq!(latest, &joined);
}

#[test]
fn test_view_ignores_other_rooms() {
    let notifier = BroadcastNotifier::default();
    let mut receiver = notifier.subscribe();
    let service = service(&notifier);

    let first = service.create_room("alice").expect("Create failed");
    service.create_room("carol").expect("Create failed");
    receiver.try_recv().expect("First snapshot missing");
    let other = receiver.try_recv().expect("Second snapshot missing");

    let mut view = RoomView::new(first.code().clone());
    assert!(!view.apply(&other));
    assert!(view.latest().is_none());
}
