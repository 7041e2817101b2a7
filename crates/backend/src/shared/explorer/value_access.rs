use serde_json::Value;

/// Value at a dotted path, walking objects only. `None` when any segment is missing.
pub fn get_by_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |node, key| node.as_object().and_then(|map| map.get(key)))
}

/// Canonical text of a value, used by filters, search and filter dropdowns.
///
/// Strings are verbatim, arrays join their elements' text with `,`, objects
/// render as compact JSON. Absent values have no string form.
pub fn string_form(value: Option<&Value>) -> Option<String> {
    value.map(render)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // nested nulls render empty inside a joined array
                Value::Null => String::new(),
                other => render(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_by_path() {
        let record = json!({"a": {"b": {"c": 5}}, "list": [1, 2], "n": null});
        assert_eq!(get_by_path(&record, "a.b.c"), Some(&json!(5)));
        assert_eq!(get_by_path(&record, "a.b"), Some(&json!({"c": 5})));
        assert_eq!(get_by_path(&record, "n"), Some(&Value::Null));
        assert_eq!(get_by_path(&record, "a.x"), None);
        // arrays are not indexed into
        assert_eq!(get_by_path(&record, "list.0"), None);
        assert_eq!(get_by_path(&record, "n.deeper"), None);
    }

    #[test]
    fn test_string_form() {
        assert_eq!(string_form(None), None);
        assert_eq!(string_form(Some(&json!(null))).unwrap(), "null");
        assert_eq!(string_form(Some(&json!("Hi"))).unwrap(), "Hi");
        assert_eq!(string_form(Some(&json!(12))).unwrap(), "12");
        assert_eq!(string_form(Some(&json!(1.5))).unwrap(), "1.5");
        assert_eq!(string_form(Some(&json!(false))).unwrap(), "false");
        assert_eq!(string_form(Some(&json!(["x", 2, null]))).unwrap(), "x,2,");
        assert_eq!(string_form(Some(&json!({"k": 1}))).unwrap(), "{\"k\":1}");
    }
}
