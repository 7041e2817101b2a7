use serde::{Deserialize, Serialize};

use super::role::FieldPath;

/// Field catalog of the loaded dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalogDto {
    /// Discovery order (first record, depth-first)
    pub ordered: Vec<FieldPath>,
    /// Lexicographic order
    pub sorted: Vec<FieldPath>,
}
