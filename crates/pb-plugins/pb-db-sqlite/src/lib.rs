//! # pb-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `pb-core` board document: one row per card plus a
//! single-row viewport table keyed by a fixed owner id.

use async_trait::async_trait;
use chrono::Utc;
use pb_core::models::{BoardState, Card, Priority};
use pb_core::traits::BoardRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;

/// The single logical owner of the board document.
const OWNER_ID: &str = "default";

pub struct SqliteBoardRepo {
    pool: SqlitePool,
}

impl SqliteBoardRepo {
    /// Connects and prepares the schema. `url` accepts the usual sqlx
    /// forms ("sqlite:pinboard.db", "sqlite::memory:"); the database file
    /// is created when missing.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            // a single board document has a single writer; one connection
            // also keeps `sqlite::memory:` on one coherent database
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cards (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                detail TEXT NOT NULL DEFAULT '',
                color TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'medium',
                x REAL NOT NULL DEFAULT 0,
                y REAL NOT NULL DEFAULT 0,
                width REAL NOT NULL DEFAULT 220,
                height REAL NOT NULL DEFAULT 140,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                z_order INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS board_config (
                id TEXT PRIMARY KEY,
                zoom REAL NOT NULL DEFAULT 1.0,
                offset_x REAL NOT NULL DEFAULT 0,
                offset_y REAL NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        log::info!("sqlite board store ready at {url}");
        Ok(Self { pool })
    }
}

// Priority travels as its lowercase wire token in the TEXT column.
fn priority_to_str(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn priority_from_str(raw: &str) -> Priority {
    match raw {
        "low" => Priority::Low,
        "high" => Priority::High,
        _ => Priority::Medium,
    }
}

fn row_to_card(row: &sqlx::sqlite::SqliteRow) -> Card {
    Card {
        id: row.get("id"),
        title: row.get("title"),
        detail: row.get("detail"),
        color: row.get("color"),
        priority: priority_from_str(&row.get::<String, _>("priority")),
        x: row.get("x"),
        y: row.get("y"),
        width: row.get("width"),
        height: row.get("height"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl BoardRepo for SqliteBoardRepo {
    /// Loads the board; `None` until the first save writes the viewport
    /// row.
    async fn load(&self) -> anyhow::Result<Option<BoardState>> {
        let config = sqlx::query("SELECT zoom, offset_x, offset_y FROM board_config WHERE id = ?")
            .bind(OWNER_ID)
            .fetch_optional(&self.pool)
            .await?;

        let Some(config) = config else {
            return Ok(None);
        };

        // z_order preserves insertion order, which is the render stacking
        let rows = sqlx::query(
            "SELECT id, title, detail, color, priority, x, y, width, height,
                    created_at, updated_at
             FROM cards ORDER BY z_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(BoardState {
            cards: rows.iter().map(row_to_card).collect(),
            zoom: config.get("zoom"),
            offset_x: config.get("offset_x"),
            offset_y: config.get("offset_y"),
        }))
    }

    /// Whole-document overwrite.
    ///
    /// # Developer Note
    /// One transaction for delete + reinsert + viewport update: a failed
    /// save must never leave half a board behind.
    async fn save(&self, state: &BoardState) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cards").execute(&mut *tx).await?;

        for (z_order, card) in state.cards.iter().enumerate() {
            sqlx::query(
                "INSERT INTO cards (id, title, detail, color, priority, x, y,
                                    width, height, created_at, updated_at, z_order)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&card.id)
            .bind(&card.title)
            .bind(&card.detail)
            .bind(&card.color)
            .bind(priority_to_str(card.priority))
            .bind(card.x)
            .bind(card.y)
            .bind(card.width)
            .bind(card.height)
            .bind(card.created_at)
            .bind(card.updated_at)
            .bind(z_order as i64)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO board_config (id, zoom, offset_x, offset_y, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                zoom = excluded.zoom,
                offset_x = excluded.offset_x,
                offset_y = excluded.offset_y,
                updated_at = excluded.updated_at",
        )
        .bind(OWNER_ID)
        .bind(state.zoom)
        .bind(state.offset_x)
        .bind(state.offset_y)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        log::debug!("saved board ({} cards)", state.cards.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn card(id: &str, title: &str, t: DateTime<Utc>) -> Card {
        Card {
            id: id.to_string(),
            title: title.to_string(),
            detail: "body".to_string(),
            color: "#c8e6c9".to_string(),
            priority: Priority::High,
            x: 15.0,
            y: -20.0,
            width: 220.0,
            height: 140.0,
            created_at: t,
            updated_at: t,
        }
    }

    #[tokio::test]
    async fn load_before_any_save_returns_none() {
        let repo = SqliteBoardRepo::new("sqlite::memory:").await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let repo = SqliteBoardRepo::new("sqlite::memory:").await.unwrap();
        let t = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        let state = BoardState {
            cards: vec![card("card-b", "second", t), card("card-a", "first", t)],
            zoom: 0.75,
            offset_x: 33.0,
            offset_y: -12.5,
        };
        repo.save(&state).await.expect("save failed");

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
        // insertion order survived the relational detour
        assert_eq!(loaded.cards[0].id, "card-b");
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_document() {
        let repo = SqliteBoardRepo::new("sqlite::memory:").await.unwrap();
        let t = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        repo.save(&BoardState {
            cards: vec![card("card-a", "old", t)],
            ..BoardState::default()
        })
        .await
        .unwrap();

        repo.save(&BoardState {
            cards: vec![card("card-b", "new", t)],
            zoom: 1.5,
            ..BoardState::default()
        })
        .await
        .unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.cards.len(), 1);
        assert_eq!(loaded.cards[0].id, "card-b");
        assert_eq!(loaded.zoom, 1.5);
    }
}
