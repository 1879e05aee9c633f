//! Board session scenarios: the state engine plus persistence mirroring.

use integration_tests::{sample_board, test_instant, FixedClock, MemoryRemote};
use pb_core::factory::CardInit;
use pb_core::reducers::CardPatch;
use pb_session::BoardSession;
use std::sync::Arc;
use std::time::Duration;

fn session_over(remote: Arc<MemoryRemote>) -> BoardSession {
    BoardSession::new(remote, Arc::new(FixedClock(test_instant())))
}

/// Lets fire-and-forget save tasks drain.
async fn settle(remote: &MemoryRemote, until_stored: bool) {
    for _ in 0..200 {
        if !until_stored || remote.stored.lock().unwrap().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test]
async fn add_update_undo_redo_roundtrip() {
    let remote = Arc::new(MemoryRemote::default());
    let mut session = session_over(Arc::clone(&remote));

    let id = session.add_card(CardInit {
        title: Some("x".to_string()),
        ..CardInit::default()
    });
    session.update_card(
        &id,
        &CardPatch {
            title: Some("y".to_string()),
            ..CardPatch::default()
        },
    );
    assert_eq!(session.present().cards[0].title, "y");

    session.undo();
    assert_eq!(session.present().cards[0].title, "x");

    session.redo();
    assert_eq!(session.present().cards[0].title, "y");
}

#[tokio::test]
async fn the_present_snapshot_is_mirrored_to_the_remote() {
    let remote = Arc::new(MemoryRemote::default());
    let mut session = session_over(Arc::clone(&remote));

    session.add_card(CardInit {
        title: Some("persist me".to_string()),
        ..CardInit::default()
    });
    settle(&remote, true).await;

    let stored = remote.stored.lock().unwrap().clone().unwrap();
    assert_eq!(stored.cards.len(), 1);
    assert_eq!(stored.cards[0].title, "persist me");
}

#[tokio::test]
async fn failed_saves_never_roll_back_local_state() {
    let remote = Arc::new(MemoryRemote {
        fail_saves: true,
        ..MemoryRemote::default()
    });
    let mut session = session_over(Arc::clone(&remote));

    session.add_card(CardInit::default());
    settle(&remote, false).await;

    assert_eq!(session.present().cards.len(), 1);
    assert!(remote.stored.lock().unwrap().is_none());
}

#[tokio::test]
async fn session_hydrates_from_the_remote_document() {
    let remote = Arc::new(MemoryRemote::default());
    *remote.stored.lock().unwrap() = Some(sample_board());

    let mut session = session_over(Arc::clone(&remote));
    session.load_from_remote().await;

    assert_eq!(session.present(), &sample_board());
    assert!(!session.can_undo());
}

#[tokio::test]
async fn viewport_changes_skip_history_but_still_persist() {
    let remote = Arc::new(MemoryRemote::default());
    let mut session = session_over(Arc::clone(&remote));

    session.add_card(CardInit::default());
    let past_len = session.history().past.len();

    session.set_zoom(1.75);
    session.set_offset(10.0, -10.0);
    assert_eq!(session.history().past.len(), past_len);

    // undo removes the card but keeps the viewport
    session.undo();
    assert!(session.present().cards.is_empty());
    assert_eq!(session.present().zoom, 1.75);

    settle(&remote, true).await;
    let stored = remote.stored.lock().unwrap().clone().unwrap();
    assert_eq!(stored.zoom, 1.75);
}

#[tokio::test]
async fn deleting_a_card_clears_every_reference_to_it() {
    let remote = Arc::new(MemoryRemote::default());
    let mut session = session_over(remote);

    let id = session.add_card(CardInit::default());
    session.select_card(Some(id.clone()));
    session.set_editing_card(Some(id.clone()));
    assert!(session.is_new_card(&id));

    session.delete_card(&id);
    assert!(session.present().cards.is_empty());
    assert_eq!(session.ui().selected_card_id, None);
    assert_eq!(session.ui().editing_card_id, None);
    assert!(!session.is_new_card(&id));
}

#[tokio::test]
async fn dragging_at_half_zoom_doubles_the_board_space_delta() {
    let remote = Arc::new(MemoryRemote::default());
    let mut session = session_over(remote);

    let id = session.add_card(CardInit {
        x: Some(0.0),
        y: Some(0.0),
        ..CardInit::default()
    });
    session.set_zoom(0.5);
    session.move_card_after_drag(&id, 10.0, 6.0);

    let card = &session.present().cards[0];
    assert_eq!((card.x, card.y), (20.0, 12.0));
    // drag moves refresh updated_at through the update path
    assert_eq!(card.updated_at, test_instant());
}
