//! # pb-store-file
//!
//! Filesystem implementation of `BoardRepo`: the whole board document as
//! one pretty-printed JSON file. Writes go through a sibling temp file and
//! an atomic rename, so a crash mid-write never truncates the stored
//! board.

use async_trait::async_trait;
use pb_core::models::BoardState;
use pb_core::traits::BoardRepo;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

pub struct FileBoardRepo {
    /// Where the document lives (e.g., "./data/board.json").
    path: PathBuf,
}

impl FileBoardRepo {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl BoardRepo for FileBoardRepo {
    /// A missing file means "no board yet", not an error.
    async fn load(&self) -> anyhow::Result<Option<BoardState>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, state: &BoardState) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &self.path).await?;

        log::debug!("saved board to {} ({} cards)", self.path.display(), state.cards.len());
        Ok(())
    }
}
