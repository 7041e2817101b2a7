use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::mapping::RoleMapping;
use super::role::FieldPath;
use super::view::ViewSelection;

/// Saved configuration carried next to `collections` in an import file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportConfigs {
    /// role name -> field path (or "" / not-used label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_mapping: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<ViewsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_view: Option<Vec<FieldPath>>,
    /// Order is significant and must survive export/import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_view: Option<Vec<FieldPath>>,
}

/// Collections-shaped payload produced by export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    pub collections: Map<String, Value>,
    pub configs: ImportConfigs,
}

/// Current, validated configuration of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub mapping: RoleMapping,
    pub selection: ViewSelection,
}

impl ExplorerConfig {
    /// Wire form of this configuration for an export file
    pub fn to_import_configs(&self) -> ImportConfigs {
        ImportConfigs {
            controls_mapping: Some(self.mapping.to_controls_mapping()),
            views: Some(ViewsConfig {
                list_view: Some(self.selection.list_fields.clone()),
                detail_view: Some(self.selection.detail_fields.clone()),
            }),
        }
    }
}

/// User "apply" action: raw picker choices, validated by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyConfigRequest {
    #[serde(default)]
    pub mapping: RoleMapping,
    #[serde(default)]
    pub list_fields: Vec<FieldPath>,
    #[serde(default)]
    pub detail_fields: Vec<FieldPath>,
}
