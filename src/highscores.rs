//! Best-score persistence
//!
//! A single integer survives across sessions. The session only reads it when
//! it ends, and only writes it when beaten.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage for the best score
pub trait HighScoreStore {
    /// Current best, 0 if nothing has been stored
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// In-memory store for tests and hosts without storage
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHighScore {
    pub score: u32,
}

impl MemoryHighScore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Best score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> u32 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return 0;
            }
        };
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        let record = HighScoreRecord { high_score: score };
        let result = serde_json::to_string(&record)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()));
        match result {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}
