//! Flat JSON history store for weather observations.
//!
//! The whole file is read and rewritten on every mutation; volumes here are
//! small (a few hundred entries) and wholesale rewrites keep the format
//! trivially inspectable.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use skybrief_core::error::StoreError;
use skybrief_core::WeatherReport;
use std::path::PathBuf;
use tracing::debug;

/// One polled weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    #[serde(flatten)]
    pub weather: WeatherReport,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
}

/// A generated trend summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub text: String,
    pub generated_at: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub entries_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    observations: Vec<WeatherObservation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_summary: Option<WeatherSummary>,
}

/// Read/rewrite-wholesale store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn load(&self) -> Result<HistoryFile, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HistoryFile::default()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, file: &HistoryFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&self.path, content.as_bytes()).await?;
        Ok(())
    }

    /// Append an observation, dropping the oldest entries past the cap.
    pub async fn append(&self, observation: WeatherObservation) -> Result<(), StoreError> {
        let mut file = self.load().await?;
        file.observations.push(observation);

        if file.observations.len() > self.max_entries {
            let excess = file.observations.len() - self.max_entries;
            file.observations.drain(..excess);
        }

        debug!(entries = file.observations.len(), "History appended");
        self.save(&file).await
    }

    /// Observations from the last `hours`, in insertion order.
    pub async fn recent(&self, hours: i64) -> Result<Vec<WeatherObservation>, StoreError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let file = self.load().await?;
        Ok(file
            .observations
            .into_iter()
            .filter(|o| o.timestamp >= cutoff)
            .collect())
    }

    /// The most recent observation, if any.
    pub async fn latest(&self) -> Result<Option<WeatherObservation>, StoreError> {
        let file = self.load().await?;
        Ok(file.observations.into_iter().next_back())
    }

    pub async fn save_summary(&self, summary: WeatherSummary) -> Result<(), StoreError> {
        let mut file = self.load().await?;
        file.last_summary = Some(summary);
        self.save(&file).await
    }

    pub async fn last_summary(&self) -> Result<Option<WeatherSummary>, StoreError> {
        Ok(self.load().await?.last_summary)
    }

    /// Whether the summary interval has elapsed since the last summary (or
    /// no summary exists yet).
    pub async fn needs_summary(&self, interval: std::time::Duration) -> Result<bool, StoreError> {
        match self.last_summary().await? {
            None => Ok(true),
            Some(summary) => {
                let elapsed = Utc::now() - summary.generated_at;
                Ok(elapsed
                    >= Duration::from_std(interval).unwrap_or_else(|_| Duration::hours(1)))
            }
        }
    }
}
