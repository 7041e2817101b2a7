use serde::{Deserialize, Serialize};

/// Request to load a dataset file from the server's filesystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Path to a JSON file (bare array or collections object)
    pub path: String,

    /// Collection to take when the file has several
    #[serde(default)]
    pub collection: Option<String>,
}
