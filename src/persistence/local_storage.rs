//! Browser LocalStorage backend (wasm32 only)

use super::{ScoreStore, StoreError};
use crate::highscores::ScoreEntry;

/// Stores the leaderboard under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// LocalStorage key used by the web build
    pub const DEFAULT_KEY: &'static str = "highScores";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable("LocalStorage"))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<Vec<ScoreEntry>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => {
                let entries: Vec<ScoreEntry> = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", entries.len());
                Ok(entries)
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Ok(Vec::new())
            }
            Err(_) => Err(StoreError::Unavailable("LocalStorage read")),
        }
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(entries)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write"))?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}
