//! Shared fixtures and test doubles for the integration suite.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pb_core::factory::{create_card, CardInit};
use pb_core::models::{BoardState, Card};
use pb_core::traits::{BoardRemote, Clock};
use std::sync::Mutex;

/// A clock pinned to a known instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn sample_card(id: &str, title: &str) -> Card {
    create_card(
        CardInit {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..CardInit::default()
        },
        0,
        test_instant(),
    )
}

pub fn sample_board() -> BoardState {
    BoardState {
        cards: vec![sample_card("card-a", "first"), sample_card("card-b", "second")],
        zoom: 1.5,
        offset_x: -5.0,
        offset_y: 12.0,
    }
}

/// In-memory `BoardRemote` that records every snapshot it is asked to
/// mirror.
#[derive(Default)]
pub struct MemoryRemote {
    pub stored: Mutex<Option<BoardState>>,
    pub fail_saves: bool,
}

#[async_trait]
impl BoardRemote for MemoryRemote {
    async fn load(&self) -> anyhow::Result<BoardState> {
        Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, state: &BoardState) -> anyhow::Result<()> {
        if self.fail_saves {
            anyhow::bail!("remote rejected the save");
        }
        *self.stored.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}
