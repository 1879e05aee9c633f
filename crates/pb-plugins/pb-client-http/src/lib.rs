//! # pb-client-http
//!
//! reqwest implementation of `BoardRemote`: the board session's view of
//! the persistence API (`GET`/`PUT /api/board`).

use async_trait::async_trait;
use pb_core::error::AppError;
use pb_core::models::BoardState;
use pb_core::traits::BoardRemote;

pub struct HttpBoardRemote {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBoardRemote {
    /// `base_url` is the API origin, e.g. "http://localhost:3001".
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn board_url(&self) -> String {
        format!("{}/api/board", self.base_url)
    }
}

#[async_trait]
impl BoardRemote for HttpBoardRemote {
    async fn load(&self) -> anyhow::Result<BoardState> {
        let response = self.client.get(self.board_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "GET /api/board returned {status}: {body}"
            ))
            .into());
        }
        Ok(response.json().await?)
    }

    async fn save(&self, state: &BoardState) -> anyhow::Result<()> {
        let response = self.client.put(self.board_url()).json(state).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "PUT /api/board returned {status}: {body}"
            ))
            .into());
        }
        log::debug!("mirrored board to remote ({} cards)", state.cards.len());
        Ok(())
    }
}
