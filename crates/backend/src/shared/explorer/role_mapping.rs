use contracts::shared::explorer::{ImportConfigs, Role, RoleMapping};

use super::catalog::FieldCatalog;

/// Clear every role whose path is not in the catalog. Idempotent.
pub fn validate(mapping: &RoleMapping, catalog: &FieldCatalog) -> RoleMapping {
    let mut validated = mapping.clone();
    for role in Role::ALL {
        if let Some(path) = mapping.get(role) {
            if !catalog.contains(path) {
                tracing::debug!(
                    "Role {} references unknown field '{}', set to not used",
                    role,
                    path
                );
                validated.set(role, None);
            }
        }
    }
    validated
}

/// Mapping installed on load: defaults, overlaid by an imported `controls_mapping`, then validated
pub fn from_import(configs: Option<&ImportConfigs>, catalog: &FieldCatalog) -> RoleMapping {
    let mut mapping = RoleMapping::default();
    if let Some(controls) = configs.and_then(|c| c.controls_mapping.as_ref()) {
        mapping.merge_controls_mapping(controls);
    }
    validate(&mapping, catalog)
}

/// Mapped paths of the sort roles, in role order
pub fn sort_paths(mapping: &RoleMapping) -> Vec<&str> {
    Role::SORTS
        .into_iter()
        .filter_map(|role| mapping.get(role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> FieldCatalog {
        FieldCatalog::build(&[json!({"name": "x", "meta": {"tag": "t"}, "price": 1})])
    }

    #[test]
    fn test_validate_clears_unknown_paths() {
        let mapping = RoleMapping {
            search: Some("name".to_string()),
            filter1: Some("meta.tag".to_string()),
            filter2: Some("meta".to_string()),
            sort1: Some("gone".to_string()),
            ..Default::default()
        };
        let validated = validate(&mapping, &catalog());

        assert_eq!(validated.get(Role::Search), Some("name"));
        assert_eq!(validated.get(Role::Filter1), Some("meta.tag"));
        assert_eq!(validated.get(Role::Filter2), None);
        assert_eq!(validated.get(Role::Sort1), None);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mapping = RoleMapping {
            filter3: Some("price".to_string()),
            sort2: Some("nope".to_string()),
            ..Default::default()
        };
        let once = validate(&mapping, &catalog());
        let twice = validate(&once, &catalog());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_import_merges_over_defaults() {
        let configs: ImportConfigs = serde_json::from_value(json!({
            "controls_mapping": {"filter1": "meta.tag", "sort1": "missing", "bogus": "name"}
        }))
        .unwrap();
        let mapping = from_import(Some(&configs), &catalog());

        assert_eq!(mapping.get(Role::Filter1), Some("meta.tag"));
        assert_eq!(mapping.get(Role::Sort1), None);
        assert_eq!(mapping.mapped().count(), 1);
        assert_eq!(from_import(None, &catalog()), RoleMapping::default());
    }

    #[test]
    fn test_sort_paths() {
        let mapping = RoleMapping {
            sort2: Some("b".to_string()),
            sort1: Some("a".to_string()),
            filter1: Some("f".to_string()),
            ..Default::default()
        };
        assert_eq!(sort_paths(&mapping), vec!["a", "b"]);
    }
}
