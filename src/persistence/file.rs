//! JSON file backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};
use crate::highscores::ScoreEntry;

/// Stores the leaderboard as a JSON file
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so an
/// interrupted save never leaves a half-written leaderboard behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Vec<ScoreEntry>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let entries: Vec<ScoreEntry> = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores from {}", entries.len(), self.path.display());
                Ok(entries)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}
