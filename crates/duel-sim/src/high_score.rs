//! High-score persistence.
//!
//! The engine only sees the `HighScoreStore` capability: read once at match
//! start, written at most once at match end. Two backends are provided:
//! an in-memory cell (tests, embedding hosts) and a JSON key/value file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use duel_core::constants::HIGH_SCORE_KEY;

#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    #[error("high score io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored value for {key} is not a non-negative integer")]
    Malformed { key: String },

    #[error("high score store lock poisoned")]
    Poisoned,
}

/// Get/set access to the persisted best score.
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, HighScoreError>;

    fn save(&mut self, value: u32) -> Result<(), HighScoreError>;
}

/// In-memory store. Clones share the same cell, so a caller can keep a
/// handle after boxing one into the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value))),
        }
    }

    /// Current stored value, if any.
    pub fn value(&self) -> Option<u32> {
        self.value.lock().ok().and_then(|v| *v)
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<Option<u32>, HighScoreError> {
        let lock = self.value.lock().map_err(|_| HighScoreError::Poisoned)?;
        Ok(*lock)
    }

    fn save(&mut self, value: u32) -> Result<(), HighScoreError> {
        let mut lock = self.value.lock().map_err(|_| HighScoreError::Poisoned)?;
        *lock = Some(value);
        Ok(())
    }
}

/// JSON file of string keys to values, e.g. `{ "cyber_highscore": 42 }`.
/// Keys other than ours are preserved on write.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
    key: String,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: HIGH_SCORE_KEY.to_string(),
        }
    }

    /// Use a different key inside the same file.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Option<BTreeMap<String, serde_json::Value>>, HighScoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&json)?))
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> Result<Option<u32>, HighScoreError> {
        let Some(entries) = self.read_entries()? else {
            return Ok(None);
        };
        match entries.get(&self.key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| HighScoreError::Malformed {
                    key: self.key.clone(),
                }),
        }
    }

    fn save(&mut self, value: u32) -> Result<(), HighScoreError> {
        // A corrupt file is replaced rather than blocking the new record.
        let mut entries = self.read_entries().ok().flatten().unwrap_or_default();
        entries.insert(self.key.clone(), serde_json::Value::from(value));

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
