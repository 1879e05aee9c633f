//! # Core Ports
//!
//! Any storage or transport plugin must implement these traits to be used
//! by the binary or the session.

use crate::models::BoardState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Server-side persistence contract for the single board document.
///
/// The document is schema-less from the core's perspective: backends
/// overwrite it whole (UPSERT keyed by one fixed logical owner).
#[async_trait]
pub trait BoardRepo: Send + Sync {
    /// Loads the stored document; `None` when no board was ever saved.
    async fn load(&self) -> anyhow::Result<Option<BoardState>>;

    /// Overwrites the stored document.
    async fn save(&self, state: &BoardState) -> anyhow::Result<()>;
}

/// The session's view of the persistence API.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Fetches the remote document. The server substitutes an empty
    /// default when nothing was saved yet, so this never signals
    /// "not found".
    async fn load(&self) -> anyhow::Result<BoardState>;

    /// Mirrors a snapshot to the remote. Latest writer wins.
    async fn save(&self, state: &BoardState) -> anyhow::Result<()>;
}

/// Time source, injected so sessions and reducers are deterministic under
/// test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
