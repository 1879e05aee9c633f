//! Pure board-state reducers.
//!
//! Every reducer takes the current snapshot plus operation arguments and
//! returns a fresh [`BoardState`]; inputs are never mutated, so snapshots
//! can be shared across threads and history entries without locking. The
//! clock is an explicit argument rather than ambient state.

use crate::models::{BoardState, Card, Priority};
use chrono::{DateTime, Utc};

/// Field-wise overrides applied by [`update_card`].
///
/// `id` and `created_at` are deliberately absent: ids are immutable and
/// creation time never changes after the factory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub color: Option<String>,
    pub priority: Option<Priority>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl CardPatch {
    /// A patch that only repositions the card.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// Appends `card` to the board. The new card renders on top (z-order is
/// insertion order).
pub fn add_card(state: &BoardState, card: Card) -> BoardState {
    let mut cards = state.cards.clone();
    cards.push(card);
    BoardState {
        cards,
        ..state.clone()
    }
}

/// Merges `patch` into the card matching `id` and stamps `updated_at`.
///
/// An unknown id yields the state unchanged — a silent no-op, not an
/// error.
pub fn update_card(state: &BoardState, id: &str, patch: &CardPatch, now: DateTime<Utc>) -> BoardState {
    let cards = state
        .cards
        .iter()
        .map(|card| {
            if card.id != id {
                return card.clone();
            }
            let mut next = card.clone();
            if let Some(title) = &patch.title {
                next.title = title.clone();
            }
            if let Some(detail) = &patch.detail {
                next.detail = detail.clone();
            }
            if let Some(color) = &patch.color {
                next.color = color.clone();
            }
            if let Some(priority) = patch.priority {
                next.priority = priority;
            }
            if let Some(x) = patch.x {
                next.x = x;
            }
            if let Some(y) = patch.y {
                next.y = y;
            }
            if let Some(width) = patch.width {
                next.width = width;
            }
            if let Some(height) = patch.height {
                next.height = height;
            }
            next.updated_at = now;
            next
        })
        .collect();
    BoardState {
        cards,
        ..state.clone()
    }
}

/// Repositions a card. Sugar for [`update_card`] with a position patch, so
/// drag moves refresh `updated_at` through the same path as any edit.
pub fn move_card(state: &BoardState, id: &str, x: f64, y: f64, now: DateTime<Utc>) -> BoardState {
    update_card(state, id, &CardPatch::position(x, y), now)
}

/// Removes the card matching `id`; no-op if absent.
pub fn delete_card(state: &BoardState, id: &str) -> BoardState {
    BoardState {
        cards: state.cards.iter().filter(|c| c.id != id).cloned().collect(),
        ..state.clone()
    }
}

/// Replaces the zoom level only. Not history-significant.
pub fn set_zoom(state: &BoardState, zoom: f64) -> BoardState {
    BoardState {
        zoom,
        ..state.clone()
    }
}

/// Replaces the pan offsets only. Not history-significant.
pub fn set_offset(state: &BoardState, offset_x: f64, offset_y: f64) -> BoardState {
    BoardState {
        offset_x,
        offset_y,
        ..state.clone()
    }
}
