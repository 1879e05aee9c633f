//! # Board Session
//!
//! The single authoritative in-memory holder of board history and view
//! state. Intents mutate state synchronously; persistence to the remote is
//! scheduled fire-and-forget onto the tokio runtime so intents never block
//! on the network. Local state is the source of truth — a failed save only
//! surfaces through the save-status observable and is retried implicitly
//! by the next mutation.
//!
//! Dependencies (persistence remote, clock) are injected at construction,
//! so tests can run independent sessions with no shared global state.

mod status;

pub use status::SaveStatus;
use status::SaveTracker;

use std::sync::Arc;

use log::warn;
use pb_core::factory::{self, CardInit};
use pb_core::history::HistoryState;
use pb_core::models::{BoardState, CardId, Theme, UiState};
use pb_core::reducers::{self, CardPatch};
use pb_core::traits::{BoardRemote, Clock};
use pb_core::transform;

pub struct BoardSession {
    history: HistoryState,
    ui: UiState,
    /// Cards added in this session, for the "freshly added" highlight.
    new_card_ids: Vec<CardId>,
    /// Round-robin palette position; advances once per created card.
    color_index: usize,
    remote: Arc<dyn BoardRemote>,
    clock: Arc<dyn Clock>,
    tracker: Arc<SaveTracker>,
}

impl BoardSession {
    /// A session over an empty board. Call [`load_from_remote`] to hydrate
    /// it from the persistence API.
    ///
    /// [`load_from_remote`]: BoardSession::load_from_remote
    pub fn new(remote: Arc<dyn BoardRemote>, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: HistoryState::default(),
            ui: UiState::default(),
            new_card_ids: Vec::new(),
            color_index: 0,
            remote,
            clock,
            tracker: Arc::new(SaveTracker::new()),
        }
    }

    pub fn present(&self) -> &BoardState {
        &self.history.present
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_new_card(&self, id: &str) -> bool {
        self.new_card_ids.iter().any(|x| x == id)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.tracker.status()
    }

    pub fn last_save_error(&self) -> Option<String> {
        self.tracker.last_error()
    }

    /// Creates a card (palette round-robin, unique id) and commits it to
    /// history. Returns the new card's id so the UI can focus it.
    pub fn add_card(&mut self, init: CardInit) -> CardId {
        let card = factory::create_card(init, self.color_index, self.clock.now());
        self.color_index = self.color_index.wrapping_add(1);
        let id = card.id.clone();
        let next = reducers::add_card(self.present(), card);
        self.commit(next);
        self.new_card_ids.push(id.clone());
        id
    }

    /// Drops the "freshly added" marker once the UI has shown it.
    pub fn clear_new_card(&mut self, id: &str) {
        self.new_card_ids.retain(|x| x != id);
    }

    pub fn update_card(&mut self, id: &str, patch: &CardPatch) {
        let next = reducers::update_card(self.present(), id, patch, self.clock.now());
        self.commit(next);
    }

    pub fn move_card(&mut self, id: &str, x: f64, y: f64) {
        let next = reducers::move_card(self.present(), id, x, y, self.clock.now());
        self.commit(next);
    }

    /// Applies a screen-space drag delta at the current zoom, then moves
    /// the card. Unknown ids are ignored.
    pub fn move_card_after_drag(&mut self, id: &str, delta_x: f64, delta_y: f64) {
        let Some(card) = self.present().cards.iter().find(|c| c.id == id) else {
            return;
        };
        let (x, y) =
            transform::position_after_drag(card.x, card.y, delta_x, delta_y, self.present().zoom);
        self.move_card(id, x, y);
    }

    /// Deletes a card and invalidates every weak reference to it:
    /// selection, editing, and the new-card marker.
    pub fn delete_card(&mut self, id: &str) {
        let next = reducers::delete_card(self.present(), id);
        self.commit(next);
        if self.ui.selected_card_id.as_deref() == Some(id) {
            self.ui.selected_card_id = None;
        }
        if self.ui.editing_card_id.as_deref() == Some(id) {
            self.ui.editing_card_id = None;
        }
        self.new_card_ids.retain(|x| x != id);
    }

    /// View-only: mutates `present` in place so zooming never pollutes or
    /// is erased by undo/redo. The level is clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.history.present = reducers::set_zoom(self.present(), transform::clamp_zoom(zoom));
        self.schedule_save();
    }

    /// View-only, like [`set_zoom`](BoardSession::set_zoom).
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.history.present = reducers::set_offset(self.present(), x, y);
        self.schedule_save();
    }

    /// Steps back one snapshot; silent no-op when `past` is empty.
    pub fn undo(&mut self) {
        if let Some(next) = self.history.undo() {
            self.history = next;
            self.schedule_save();
        }
    }

    /// Steps forward one snapshot; silent no-op when `future` is empty.
    pub fn redo(&mut self) {
        if let Some(next) = self.history.redo() {
            self.history = next;
            self.schedule_save();
        }
    }

    pub fn select_card(&mut self, id: Option<CardId>) {
        self.ui.selected_card_id = id;
    }

    pub fn set_editing_card(&mut self, id: Option<CardId>) {
        self.ui.editing_card_id = id;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.theme = theme;
    }

    /// Hydrates the session from the persistence API, resetting the
    /// timeline around the loaded snapshot.
    ///
    /// Any transport or decode failure is logged and leaves the current
    /// (empty) board in place — startup never fails on a broken remote.
    pub async fn load_from_remote(&mut self) {
        let remote = Arc::clone(&self.remote);
        match remote.load().await {
            Ok(board) => {
                self.history = HistoryState::with_present(board);
            }
            Err(err) => {
                warn!("board load failed, starting from an empty board: {err:#}");
            }
        }
    }

    /// Persists the current present and waits for the outcome. The
    /// fire-and-forget path goes through the same sequence-numbered
    /// tracker, so a stale completion can never clobber a newer one.
    pub async fn save_to_remote(&self) {
        let seq = self.tracker.begin();
        run_save(
            Arc::clone(&self.remote),
            Arc::clone(&self.tracker),
            self.history.present.clone(),
            seq,
        )
        .await;
    }

    /// Commits a history-significant snapshot and schedules its persist.
    fn commit(&mut self, next: BoardState) {
        self.history = self.history.push(next);
        self.schedule_save();
    }

    /// Best-effort persist of the current present. The sequence number is
    /// taken synchronously, in intent order; task scheduling order cannot
    /// reorder it.
    fn schedule_save(&self) {
        let seq = self.tracker.begin();
        let remote = Arc::clone(&self.remote);
        let tracker = Arc::clone(&self.tracker);
        let snapshot = self.history.present.clone();
        tokio::spawn(async move {
            run_save(remote, tracker, snapshot, seq).await;
        });
    }
}

async fn run_save(
    remote: Arc<dyn BoardRemote>,
    tracker: Arc<SaveTracker>,
    snapshot: BoardState,
    seq: u64,
) {
    let result = remote.save(&snapshot).await;
    if let Err(err) = &result {
        warn!("board save failed: {err:#}");
    }
    if let Some(clear_after) = tracker.finish(seq, result.map_err(|err| format!("{err:#}"))) {
        // revert to idle once the status has been visible long enough;
        // clear() ignores the reset if a newer save supersedes it
        tokio::spawn(async move {
            tokio::time::sleep(clear_after).await;
            tracker.clear(seq);
        });
    }
}
