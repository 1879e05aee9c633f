//! Undo/redo timeline over whole-board snapshots.
//!
//! Full snapshots rather than inverse-operation logs: undo/redo is O(1),
//! memory is bounded by [`MAX_HISTORY`], and an undo restores the exact
//! previous state by construction.

use crate::models::BoardState;

/// Maximum number of past snapshots retained; the oldest is evicted first.
pub const MAX_HISTORY: usize = 50;

/// The three segments of the timeline: undoable snapshots (oldest first),
/// the current board, and redoable snapshots (nearest first). Never
/// persisted — only `present` leaves the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub past: Vec<BoardState>,
    pub present: BoardState,
    pub future: Vec<BoardState>,
}

impl HistoryState {
    /// A fresh timeline around `present`, with nothing to undo or redo.
    pub fn with_present(present: BoardState) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    /// Commits `next` as the new present.
    ///
    /// The old present becomes the newest `past` entry (trimming the oldest
    /// beyond the cap) and anything redoable is dropped: no redo survives a
    /// fresh edit.
    #[must_use]
    pub fn push(&self, next: BoardState) -> HistoryState {
        let mut past = self.past.clone();
        past.push(self.present.clone());
        if past.len() > MAX_HISTORY {
            past.remove(0);
        }
        HistoryState {
            past,
            present: next,
            future: Vec::new(),
        }
    }

    /// Steps back one snapshot. `None` when there is nothing to undo —
    /// callers must treat that as a no-op, not a success.
    #[must_use]
    pub fn undo(&self) -> Option<HistoryState> {
        let mut past = self.past.clone();
        let present = past.pop()?;
        let mut future = Vec::with_capacity(self.future.len() + 1);
        future.push(self.present.clone());
        future.extend_from_slice(&self.future);
        Some(HistoryState {
            past,
            present,
            future,
        })
    }

    /// Steps forward one snapshot. `None` when there is nothing to redo.
    ///
    /// The old present goes back onto `past` without a cap re-check: the
    /// stack only returns to a size it already had.
    #[must_use]
    pub fn redo(&self) -> Option<HistoryState> {
        if self.future.is_empty() {
            return None;
        }
        let mut future = self.future.clone();
        let present = future.remove(0);
        let mut past = self.past.clone();
        past.push(self.present.clone());
        Some(HistoryState {
            past,
            present,
            future,
        })
    }

    /// True when at least one snapshot can be undone.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// True when at least one snapshot can be redone.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardState;

    fn board_with_zoom(zoom: f64) -> BoardState {
        BoardState {
            zoom,
            ..BoardState::default()
        }
    }

    #[test]
    fn push_moves_present_into_past_and_clears_future() {
        let history = HistoryState::with_present(board_with_zoom(1.0));
        let history = history.push(board_with_zoom(1.5));
        let undone = history.undo().unwrap();
        assert!(undone.can_redo());

        let pushed = undone.push(board_with_zoom(0.5));
        assert_eq!(pushed.present, board_with_zoom(0.5));
        assert!(pushed.future.is_empty());
        assert_eq!(pushed.past.last().unwrap(), &board_with_zoom(1.0));
    }

    #[test]
    fn undo_on_empty_past_is_a_noop() {
        let history = HistoryState::default();
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn redo_on_empty_future_is_a_noop() {
        let history = HistoryState::default();
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn undo_then_redo_restores_present() {
        let history = HistoryState::with_present(board_with_zoom(1.0)).push(board_with_zoom(2.0));
        let roundtrip = history.undo().unwrap().redo().unwrap();
        assert_eq!(roundtrip.present, history.present);
        assert_eq!(roundtrip.past, history.past);
    }

    #[test]
    fn past_is_capped_with_fifo_eviction() {
        let mut history = HistoryState::with_present(board_with_zoom(0.0));
        for i in 1..=(MAX_HISTORY + 10) {
            history = history.push(board_with_zoom(i as f64));
        }
        assert_eq!(history.past.len(), MAX_HISTORY);
        // the ten oldest snapshots (zoom 0..=9) were evicted
        assert_eq!(history.past.first().unwrap().zoom, 10.0);
        assert_eq!(history.present.zoom, (MAX_HISTORY + 10) as f64);
    }
}
