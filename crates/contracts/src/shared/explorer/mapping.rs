use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::role::{FieldPath, Role, NOT_USED_LABEL};

/// Total mapping from every role to a field path (`None` = not used)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    #[serde(default)]
    pub search: Option<FieldPath>,
    #[serde(default)]
    pub filter1: Option<FieldPath>,
    #[serde(default)]
    pub filter2: Option<FieldPath>,
    #[serde(default)]
    pub filter3: Option<FieldPath>,
    #[serde(default)]
    pub sort1: Option<FieldPath>,
    #[serde(default)]
    pub sort2: Option<FieldPath>,
}

impl RoleMapping {
    pub fn get(&self, role: Role) -> Option<&str> {
        self.slot(role).as_deref()
    }

    pub fn set(&mut self, role: Role, path: Option<FieldPath>) {
        *self.slot_mut(role) = path;
    }

    fn slot(&self, role: Role) -> &Option<FieldPath> {
        match role {
            Role::Search => &self.search,
            Role::Filter1 => &self.filter1,
            Role::Filter2 => &self.filter2,
            Role::Filter3 => &self.filter3,
            Role::Sort1 => &self.sort1,
            Role::Sort2 => &self.sort2,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<FieldPath> {
        match role {
            Role::Search => &mut self.search,
            Role::Filter1 => &mut self.filter1,
            Role::Filter2 => &mut self.filter2,
            Role::Filter3 => &mut self.filter3,
            Role::Sort1 => &mut self.sort1,
            Role::Sort2 => &mut self.sort2,
        }
    }

    /// Iterate `(role, path)` over mapped roles in canonical order
    pub fn mapped(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|path| (role, path)))
    }

    /// Overlay an imported `controls_mapping` object onto this mapping.
    ///
    /// Unknown keys are ignored. Empty strings, the not-used label and
    /// non-string values all clear the role.
    pub fn merge_controls_mapping(&mut self, controls: &Map<String, Value>) {
        for (key, value) in controls {
            let Ok(role) = key.parse::<Role>() else {
                continue;
            };
            let path = match value {
                Value::String(s) if !s.is_empty() && s != NOT_USED_LABEL => Some(s.clone()),
                _ => None,
            };
            self.set(role, path);
        }
    }

    /// Wire form for export: every role present, unmapped ones carry the not-used label
    pub fn to_controls_mapping(&self) -> Map<String, Value> {
        Role::ALL
            .into_iter()
            .map(|role| {
                let value = self.get(role).unwrap_or(NOT_USED_LABEL).to_string();
                (role.as_str().to_string(), Value::String(value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_controls_mapping() {
        let controls = json!({
            "search": "name",
            "filter1": "",
            "filter2": NOT_USED_LABEL,
            "sort1": "price",
            "unknown": "whatever",
            "sort2": 42
        });
        let mut mapping = RoleMapping {
            filter1: Some("stale".to_string()),
            sort2: Some("stale".to_string()),
            ..Default::default()
        };
        mapping.merge_controls_mapping(controls.as_object().unwrap());

        assert_eq!(mapping.get(Role::Search), Some("name"));
        assert_eq!(mapping.get(Role::Filter1), None);
        assert_eq!(mapping.get(Role::Filter2), None);
        assert_eq!(mapping.get(Role::Filter3), None);
        assert_eq!(mapping.get(Role::Sort1), Some("price"));
        assert_eq!(mapping.get(Role::Sort2), None);
    }

    #[test]
    fn test_controls_mapping_export_reimports_identically() {
        let mut mapping = RoleMapping::default();
        mapping.set(Role::Filter3, Some("a.b".to_string()));
        mapping.set(Role::Sort2, Some("c".to_string()));

        let exported = mapping.to_controls_mapping();
        assert_eq!(exported.len(), 6);
        assert_eq!(exported["search"], json!(NOT_USED_LABEL));

        let mut reimported = RoleMapping::default();
        reimported.merge_controls_mapping(&exported);
        assert_eq!(reimported, mapping);
    }

    #[test]
    fn test_mapped_iterates_in_role_order() {
        let mapping = RoleMapping {
            sort1: Some("s".to_string()),
            filter1: Some("f".to_string()),
            ..Default::default()
        };
        let mapped: Vec<_> = mapping.mapped().collect();
        assert_eq!(mapped, vec![(Role::Filter1, "f"), (Role::Sort1, "s")]);
    }
}
