use serde::{Deserialize, Serialize};

use super::role::FieldPath;

/// Which fields the list cards and the detail view show, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    pub list_fields: Vec<FieldPath>,
    pub detail_fields: Vec<FieldPath>,
}

/// The two field pickers a client renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    List,
    Detail,
}

/// One row of a field picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEditorItem {
    pub path: FieldPath,
    pub checked: bool,
}
