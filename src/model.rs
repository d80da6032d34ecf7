// Core structs: Row, Dataset, MarketSummary, AnnouncementEntry, Card
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;
use thiserror::Error;

/// One CSV record keyed by header text exactly as it appears in the file.
/// Columns the record was too short to fill hold `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new(entries: Vec<(String, Option<String>)>) -> Self {
        Self { entries }
    }

    /// Builds a fully populated row from `(header, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(h, v)| (h.to_string(), Some(v.to_string())))
                .collect(),
        )
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(h, v)| (h.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A CSV file found in the data directory.
#[derive(Debug, Clone)]
pub struct DatasetFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Date token embedded in the file name, if it parsed.
    pub date: Option<NaiveDate>,
    pub modified: SystemTime,
}

/// The parsed contents of the selected dataset file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file: DatasetFile,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub ticker: String,
    pub company: Option<String>,
    pub csv_filename: String,
    pub eod_date: Option<String>,
    pub price: Option<f64>,
    pub price_display: Option<String>,
    pub change_1d_pct: Option<f64>,
    pub change_1d_display: Option<String>,
    pub change_1w_pct: Option<f64>,
    pub change_1w_display: Option<String>,
    pub volume_24h_raw: Option<String>,
    pub volume_24h: Option<f64>,
    pub volume_24h_display: Option<String>,
    pub mcap_raw: Option<String>,
    pub mcap: Option<f64>,
    pub mcap_display: Option<String>,
    pub rank: Option<i64>,
    pub vwap: Option<f64>,
    pub vwap_display: Option<String>,
    pub atr14: Option<f64>,
    pub atr14_display: Option<String>,
    pub relative_vol: Option<f64>,
    pub vol_change: Option<f64>,
    pub volatility: Option<f64>,
    pub beta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementEntry {
    pub filename: String,
    pub ticker_guess: String,
    pub company: String,
    pub download_url: String,
    pub size_bytes: u64,
    pub mtime_iso: String,
    pub filename_date: Option<String>,
    #[serde(skip)]
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementListing {
    pub count: usize,
    pub files: Vec<AnnouncementEntry>,
}

/// A stored announcement card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: i64,
    pub source: Option<String>,
    pub company: Option<String>,
    pub event_type: Option<String>,
    pub raw_text: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub approved: bool,
    pub metadata: Option<serde_json::Value>,
}

/// Request body for creating a card; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCard {
    pub source: Option<String>,
    pub company: Option<String>,
    pub event_type: Option<String>,
    pub raw_text: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved: bool,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("EOD CSV not found in {dir}")]
    NotConfigured { dir: String },
    #[error("Failed reading CSV {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Empty ticker")]
    EmptyTicker,
    #[error("Ticker '{ticker}' not found in CSV at {file}")]
    NotFound { ticker: String, file: String },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Debug, Error)]
pub enum AnnouncementError {
    #[error("Announcements folder not found at {dir}")]
    UploadsMissing { dir: String },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// Includes stored timestamps or metadata that fail to decode, reported
    /// as a conversion failure on the offending column.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    #[error("metadata is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
