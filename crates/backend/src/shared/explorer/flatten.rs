use contracts::shared::explorer::FieldPath;
use serde_json::Value;

/// Leaf paths of a record in depth-first, document order.
///
/// Only objects are descended into. Arrays, `null` and scalars end the walk
/// and emit the accumulated path; an empty object emits nothing. Duplicates
/// across records are the catalog's concern.
pub fn flatten(record: &Value) -> Vec<FieldPath> {
    let mut paths = Vec::new();
    if let Value::Object(map) = record {
        collect(map, "", &mut paths);
    }
    paths
}

fn collect(map: &serde_json::Map<String, Value>, prefix: &str, out: &mut Vec<FieldPath>) {
    for (key, value) in map {
        let path = join(prefix, key);
        match value {
            Value::Object(child) => collect(child, &path, out),
            Value::Array(_)
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_) => {
                out.push(path)
            }
        }
    }
}

fn join(prefix: &str, key: &str) -> FieldPath {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arrays_are_leaves() {
        assert_eq!(flatten(&json!({"a": [1, 2]})), vec!["a"]);
        assert_eq!(flatten(&json!({"a": [{"b": 1}]})), vec!["a"]);
        assert_eq!(flatten(&json!({"a": []})), vec!["a"]);
    }

    #[test]
    fn test_nested_objects_in_document_order() {
        let record = json!({
            "z": 1,
            "user": {"name": "Ann", "address": {"city": "Oslo", "zip": null}},
            "a": true
        });
        assert_eq!(
            flatten(&record),
            vec!["z", "user.name", "user.address.city", "user.address.zip", "a"]
        );
    }

    #[test]
    fn test_empty_object_and_non_object_root() {
        assert!(flatten(&json!({"meta": {}})).is_empty());
        assert!(flatten(&json!(42)).is_empty());
        assert!(flatten(&json!([{"a": 1}])).is_empty());
    }
}
