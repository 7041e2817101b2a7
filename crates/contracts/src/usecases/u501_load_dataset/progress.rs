use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::LoadSummary;

/// Progress of a background dataset load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadProgress {
    pub load_id: String,
    pub status: LoadStatus,
    /// File path or "upload"
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    /// Bytes read so far
    pub bytes_read: usize,

    pub summary: Option<LoadSummary>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Reading the source
    Reading,
    /// Parsing records and building the catalog
    Parsing,
    /// New dataset installed
    Completed,
    /// Load aborted, previous dataset kept
    Failed,
}

impl LoadProgress {
    pub fn new(load_id: String, source: String) -> Self {
        Self {
            load_id,
            status: LoadStatus::Reading,
            source,
            started_at: Utc::now(),
            completed_at: None,
            updated_at: Utc::now(),
            bytes_read: 0,
            summary: None,
            error_message: None,
        }
    }
}
