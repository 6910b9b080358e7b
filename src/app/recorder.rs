//! Optional hook that remembers successful searches.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::tmdb::{Movie, poster_url};

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("search log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("search log is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Called after a non-empty search returned at least one movie.
pub trait SearchRecorder: Send {
    fn record_search(&mut self, query: &str, top_result: &Movie) -> Result<(), RecorderError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: String,
    pub count: u32,
    pub movie_id: u64,
    pub poster_url: Option<String>,
    pub last_searched: DateTime<Local>,
}

/// Keeps a per-query search count in a JSON file.
pub struct FileSearchRecorder {
    path: PathBuf,
    image_base_url: String,
}

impl FileSearchRecorder {
    pub fn new(path: impl Into<PathBuf>, image_base_url: &str) -> Self {
        Self {
            path: path.into(),
            image_base_url: image_base_url.to_string(),
        }
    }

    /// `<data dir>/movie_finder/searches.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("movie_finder").join("searches.json"))
    }

    pub fn load(&self) -> Result<Vec<SearchRecord>, RecorderError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, records: &[SearchRecord]) -> Result<(), RecorderError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SearchRecorder for FileSearchRecorder {
    fn record_search(&mut self, query: &str, top_result: &Movie) -> Result<(), RecorderError> {
        let mut records = self.load()?;
        let now = Local::now();

        match records.iter_mut().find(|record| record.query == query) {
            Some(record) => {
                record.count += 1;
                record.last_searched = now;
            }
            None => records.push(SearchRecord {
                query: query.to_string(),
                count: 1,
                movie_id: top_result.id,
                poster_url: poster_url(&self.image_base_url, top_result.poster_path.as_deref()),
                last_searched: now,
            }),
        }

        self.save(&records)
    }
}
