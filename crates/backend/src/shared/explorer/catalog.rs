use std::collections::HashSet;

use contracts::shared::explorer::{FieldCatalogDto, FieldPath};
use serde_json::Value;

use super::flatten::flatten;

/// Deduplicated field paths discovered across a dataset
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    ordered: Vec<FieldPath>,
    sorted: Vec<FieldPath>,
    members: HashSet<FieldPath>,
}

impl FieldCatalog {
    /// Build a fresh catalog: first-seen order across records, later duplicates ignored
    pub fn build(records: &[Value]) -> Self {
        let mut ordered = Vec::new();
        let mut members = HashSet::new();

        for record in records {
            for path in flatten(record) {
                if members.insert(path.clone()) {
                    ordered.push(path);
                }
            }
        }

        let mut sorted = ordered.clone();
        sorted.sort();

        Self {
            ordered,
            sorted,
            members,
        }
    }

    /// Paths in discovery order
    pub fn ordered(&self) -> &[FieldPath] {
        &self.ordered
    }

    /// Paths in code-point order
    pub fn sorted(&self) -> &[FieldPath] {
        &self.sorted
    }

    pub fn contains(&self, path: &str) -> bool {
        self.members.contains(path)
    }

    /// First discovered path
    pub fn first(&self) -> Option<&FieldPath> {
        self.ordered.first()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn to_dto(&self) -> FieldCatalogDto {
        FieldCatalogDto {
            ordered: self.ordered.clone(),
            sorted: self.sorted.clone(),
        }
    }
}
