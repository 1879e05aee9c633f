//! Card construction with palette round-robin defaults.
//!
//! The palette index is threaded through the call rather than kept in a
//! process-wide counter: the caller (normally the session) owns it, which
//! keeps factory calls deterministic and reentrant.

use crate::models::{Card, CardId, Priority};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fixed palette cycled through for new cards.
pub const DEFAULT_COLORS: [&str; 4] = ["#ffeb3b", "#c8e6c9", "#bbdefb", "#f8bbd0"];

pub const DEFAULT_CARD_WIDTH: f64 = 220.0;
pub const DEFAULT_CARD_HEIGHT: f64 = 140.0;

/// Optional overrides for a new card; anything left `None` falls back to
/// the documented default.
#[derive(Debug, Clone, Default)]
pub struct CardInit {
    pub id: Option<CardId>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub color: Option<String>,
    pub priority: Option<Priority>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Builds a card from `init`, filling defaults.
///
/// Defaults: empty title/detail, `DEFAULT_COLORS[color_index % 4]`, medium
/// priority, position (0,0), 220×140, both timestamps `now`.
pub fn create_card(init: CardInit, color_index: usize, now: DateTime<Utc>) -> Card {
    Card {
        id: init.id.unwrap_or_else(generate_card_id),
        title: init.title.unwrap_or_default(),
        detail: init.detail.unwrap_or_default(),
        color: init
            .color
            .unwrap_or_else(|| DEFAULT_COLORS[color_index % DEFAULT_COLORS.len()].to_string()),
        priority: init.priority.unwrap_or_default(),
        x: init.x.unwrap_or(0.0),
        y: init.y.unwrap_or(0.0),
        width: init.width.unwrap_or(DEFAULT_CARD_WIDTH),
        height: init.height.unwrap_or(DEFAULT_CARD_HEIGHT),
        created_at: init.created_at.unwrap_or(now),
        updated_at: init.updated_at.unwrap_or(now),
    }
}

/// Time-ordered, process-unique card id.
///
/// UUID v7 embeds a millisecond timestamp plus random bits, so collisions
/// between legitimate concurrent calls are negligible. Uniqueness is not
/// defended against adversarial input.
pub fn generate_card_id() -> CardId {
    format!("card-{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn defaults_are_applied() {
        let card = create_card(CardInit::default(), 0, t0());
        assert!(card.id.starts_with("card-"));
        assert_eq!(card.title, "");
        assert_eq!(card.detail, "");
        assert_eq!(card.color, DEFAULT_COLORS[0]);
        assert_eq!(card.priority, Priority::Medium);
        assert_eq!((card.x, card.y), (0.0, 0.0));
        assert_eq!((card.width, card.height), (DEFAULT_CARD_WIDTH, DEFAULT_CARD_HEIGHT));
        assert_eq!(card.created_at, t0());
        assert_eq!(card.updated_at, t0());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let card = create_card(
            CardInit {
                id: Some("card-custom".to_string()),
                title: Some("groceries".to_string()),
                color: Some("#123456".to_string()),
                priority: Some(Priority::High),
                x: Some(40.0),
                width: Some(300.0),
                ..CardInit::default()
            },
            2,
            t0(),
        );
        assert_eq!(card.id, "card-custom");
        assert_eq!(card.title, "groceries");
        assert_eq!(card.color, "#123456");
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.x, 40.0);
        assert_eq!(card.width, 300.0);
    }

    #[test]
    fn palette_cycles_round_robin() {
        let colors: Vec<String> = (0..6)
            .map(|i| create_card(CardInit::default(), i, t0()).color)
            .collect();
        assert_eq!(colors[0], DEFAULT_COLORS[0]);
        assert_eq!(colors[3], DEFAULT_COLORS[3]);
        assert_eq!(colors[4], DEFAULT_COLORS[0]);
        assert_eq!(colors[5], DEFAULT_COLORS[1]);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<CardId> = (0..1000).map(|_| generate_card_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
