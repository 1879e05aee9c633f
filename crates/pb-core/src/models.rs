//! # Domain Models
//!
//! These structs represent the core entities of Pinboard: the board
//! document that gets persisted, and the transient view state that never
//! leaves the process. Field names serialize in camelCase to match the
//! stored JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a card (e.g., "card-0190b7…").
pub type CardId = String;

/// Importance level displayed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A positioned, sized, colored note on the board.
///
/// `id` is immutable once created; `updated_at` is refreshed by the update
/// reducer on every field mutation, drag moves included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    pub color: String,
    #[serde(default)]
    pub priority: Priority,
    /// Board-space top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One snapshot of the whole board.
///
/// Insertion order of `cards` is the render z-order; ids are unique within
/// the list. `zoom` stays positive (the session clamps it), offsets are
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub cards: Vec<Card>,
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for BoardState {
    /// The empty document served before anything was ever saved.
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Color theme selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Transient view state. Never persisted remotely and never part of undo
/// history.
///
/// The card references are weak: deleting a card must clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub selected_card_id: Option<CardId>,
    pub editing_card_id: Option<CardId>,
    pub theme: Theme,
}
