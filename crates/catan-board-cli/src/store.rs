//! Game state persistence as a JSON file.

use anyhow::Context;
use catan_board::{GameSession, GameStateJson};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes the session document at a fixed path.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, or `None` if nothing has been saved yet.
    pub async fn load(&self) -> anyhow::Result<Option<GameSession>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved game state at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        let state: GameStateJson = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        let session = GameSession::from_json(state)
            .with_context(|| format!("loading {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Write the session, replacing any previous file.
    pub async fn save(&self, session: &GameSession) -> anyhow::Result<()> {
        let text = serde_json::to_string(&session.to_json())?;
        // Written beside the target, then renamed into place
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        debug!("Game state saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored session if there is one.
    pub async fn delete(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Game state deleted from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("deleting {}", self.path.display())),
        }
    }
}
