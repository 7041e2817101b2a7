use serde::{Deserialize, Serialize};

/// Response to a load request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    pub load_id: String,
    pub status: LoadStartStatus,
    pub message: String,
    /// Present once the new dataset is installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<LoadSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LoadStartStatus {
    /// Background load started
    Started,
    /// Dataset installed
    Completed,
}

/// What the installed dataset looks like
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadSummary {
    /// Collection name (None for a bare array payload)
    pub collection: Option<String>,
    pub record_count: usize,
    pub field_count: usize,
    /// Whether the payload carried a saved configuration
    pub config_imported: bool,
}
