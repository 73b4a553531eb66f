//! Best-score persistence.
//!
//! A single integer, stored as `{"best_score": N}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub trait BestScoreStore {
    /// Stored best score; `0` when nothing was stored yet.
    fn load(&mut self) -> Result<u32>;
    fn save(&mut self, best_score: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileBestScore {
    path: PathBuf,
}

impl FileBestScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScore {
    fn load(&mut self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read best score from {}", self.path.display()))?;
        let record: BestScoreRecord = serde_json::from_str(&text)
            .with_context(|| format!("parse best score in {}", self.path.display()))?;
        Ok(record.best_score)
    }

    fn save(&mut self, best_score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&BestScoreRecord { best_score })?;
        fs::write(&self.path, json)
            .with_context(|| format!("write best score to {}", self.path.display()))?;
        tracing::debug!(best_score, path = %self.path.display(), "best score saved");
        Ok(())
    }
}

/// In-memory store for `--no-save` runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScore {
    best_score: u32,
    saves: usize,
}

impl MemoryBestScore {
    pub fn new(best_score: u32) -> Self {
        Self {
            best_score,
            saves: 0,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&mut self) -> Result<u32> {
        Ok(self.best_score)
    }

    fn save(&mut self, best_score: u32) -> Result<()> {
        self.best_score = best_score;
        self.saves += 1;
        Ok(())
    }
}
