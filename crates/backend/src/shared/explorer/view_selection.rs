use std::collections::HashSet;

use contracts::shared::explorer::{FieldEditorItem, FieldPath, ImportConfigs, ViewSelection};

use super::catalog::FieldCatalog;

/// Resolve user choices into a usable selection.
///
/// Both lists keep only catalog members, in the caller's order, without
/// duplicates. An empty list view falls back to the first discovered field;
/// an empty detail view falls back to the whole catalog in discovery order.
pub fn resolve(
    selected_list: &[FieldPath],
    selected_detail: &[FieldPath],
    catalog: &FieldCatalog,
) -> ViewSelection {
    let mut list_fields = retain_known(selected_list, catalog);
    if list_fields.is_empty() {
        list_fields = catalog.first().cloned().into_iter().collect();
    }

    let mut detail_fields = retain_known(selected_detail, catalog);
    if detail_fields.is_empty() {
        detail_fields = catalog.ordered().to_vec();
    }

    ViewSelection {
        list_fields,
        detail_fields,
    }
}

/// Selection installed on load from the optional `views` config
pub fn from_import(configs: Option<&ImportConfigs>, catalog: &FieldCatalog) -> ViewSelection {
    let views = configs.and_then(|c| c.views.as_ref());
    let list = views.and_then(|v| v.list_view.as_deref()).unwrap_or_default();
    let detail = views.and_then(|v| v.detail_view.as_deref()).unwrap_or_default();
    resolve(list, detail, catalog)
}

/// Order of a field picker: selected fields first as chosen, then the rest sorted
pub fn editor_order(selected: &[FieldPath], catalog: &FieldCatalog) -> Vec<FieldEditorItem> {
    let chosen = retain_known(selected, catalog);
    let chosen_set: HashSet<&str> = chosen.iter().map(String::as_str).collect();

    let rest: Vec<FieldEditorItem> = catalog
        .sorted()
        .iter()
        .filter(|path| !chosen_set.contains(path.as_str()))
        .map(|path| FieldEditorItem {
            path: path.clone(),
            checked: false,
        })
        .collect();

    chosen
        .into_iter()
        .map(|path| FieldEditorItem {
            path,
            checked: true,
        })
        .chain(rest)
        .collect()
}

fn retain_known(paths: &[FieldPath], catalog: &FieldCatalog) -> Vec<FieldPath> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter(|path| {
            let known = catalog.contains(path);
            if !known {
                tracing::debug!("Dropping unknown view field '{}'", path);
            }
            known && seen.insert(path.as_str())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(items: &[&str]) -> Vec<FieldPath> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn catalog() -> FieldCatalog {
        FieldCatalog::build(&[json!({"title": 1, "b": {"c": 2}, "a": 3})])
    }

    #[test]
    fn test_resolve_keeps_caller_order() {
        let selection = resolve(
            &paths(&["a", "missing", "title", "a"]),
            &paths(&["b.c", "title"]),
            &catalog(),
        );
        assert_eq!(selection.list_fields, paths(&["a", "title"]));
        assert_eq!(selection.detail_fields, paths(&["b.c", "title"]));
    }

    #[test]
    fn test_resolve_fallbacks() {
        let selection = resolve(&[], &paths(&["nope"]), &catalog());
        assert_eq!(selection.list_fields, paths(&["title"]));
        assert_eq!(selection.detail_fields, paths(&["title", "b.c", "a"]));
    }

    #[test]
    fn test_resolve_on_empty_catalog() {
        let selection = resolve(&paths(&["x"]), &[], &FieldCatalog::default());
        assert!(selection.list_fields.is_empty());
        assert!(selection.detail_fields.is_empty());
    }

    #[test]
    fn test_resolved_selection_round_trips() {
        let catalog = catalog();
        let first = resolve(&paths(&["b.c"]), &paths(&["a", "title"]), &catalog);
        let again = resolve(&first.list_fields, &first.detail_fields, &catalog);
        assert_eq!(first, again);
    }

    #[test]
    fn test_editor_order() {
        let items = editor_order(&paths(&["title", "gone"]), &catalog());
        let order: Vec<_> = items.iter().map(|i| (i.path.as_str(), i.checked)).collect();
        assert_eq!(order, vec![("title", true), ("a", false), ("b.c", false)]);
    }
}
