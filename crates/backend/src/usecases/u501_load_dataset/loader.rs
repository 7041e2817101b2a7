use std::path::PathBuf;

use async_trait::async_trait;
use contracts::shared::explorer::ImportConfigs;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Payload has several collections, choose one of: {}", .0.join(", "))]
    AmbiguousCollection(Vec<String>),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Import payload after shape checks and collection resolution
#[derive(Debug, Clone)]
pub struct ParsedPayload {
    /// None for a bare array
    pub collection: Option<String>,
    pub records: Vec<Value>,
    pub configs: Option<ImportConfigs>,
}

/// Where the bytes of a payload come from
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn read(&self) -> Result<Vec<u8>, LoadError>;

    /// Label for progress and logs
    fn describe(&self) -> String;
}

/// JSON file on the server's filesystem
pub struct FileSource {
    pub path: PathBuf,
}

#[async_trait]
impl PayloadSource for FileSource {
    async fn read(&self) -> Result<Vec<u8>, LoadError> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Request body of an upload
pub struct BytesSource {
    pub bytes: Vec<u8>,
}

#[async_trait]
impl PayloadSource for BytesSource {
    async fn read(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        "upload".to_string()
    }
}

/// Parse an import payload: a bare array of records, or
/// `{"collections": {name: [records]}, "configs": {...}}`.
pub fn parse_payload(bytes: &[u8], collection: Option<&str>) -> Result<ParsedPayload, LoadError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| LoadError::MalformedInput(e.to_string()))?;

    match root {
        Value::Array(records) => {
            if let Some(name) = collection {
                tracing::debug!("Payload is a bare array, ignoring collection '{}'", name);
            }
            Ok(ParsedPayload {
                collection: None,
                records,
                configs: None,
            })
        }
        Value::Object(mut object) => {
            let collections = match object.remove("collections") {
                Some(Value::Object(collections)) => collections,
                Some(_) => {
                    return Err(LoadError::MalformedInput(
                        "'collections' must be an object".to_string(),
                    ))
                }
                None => {
                    return Err(LoadError::MalformedInput(
                        "expected an array of records or an object with 'collections'".to_string(),
                    ))
                }
            };

            let (name, records) = resolve_collection(collections, collection)?;
            let configs = object.remove("configs").and_then(parse_configs);

            Ok(ParsedPayload {
                collection: Some(name),
                records,
                configs,
            })
        }
        other => Err(LoadError::MalformedInput(format!(
            "expected an array or an object, got {}",
            kind_name(&other)
        ))),
    }
}

fn resolve_collection(
    mut collections: Map<String, Value>,
    requested: Option<&str>,
) -> Result<(String, Vec<Value>), LoadError> {
    let name = match requested {
        Some(name) => name.to_string(),
        None => {
            let mut names = collections.keys();
            match (names.next(), names.next()) {
                (Some(only), None) => only.clone(),
                (None, _) => {
                    return Err(LoadError::MalformedInput(
                        "'collections' is empty".to_string(),
                    ))
                }
                _ => {
                    return Err(LoadError::AmbiguousCollection(
                        collections.keys().cloned().collect(),
                    ))
                }
            }
        }
    };

    match collections.remove(&name) {
        Some(Value::Array(records)) => Ok((name, records)),
        Some(other) => Err(LoadError::MalformedInput(format!(
            "collection '{}' must be an array, got {}",
            name,
            kind_name(&other)
        ))),
        None => Err(LoadError::CollectionNotFound(name)),
    }
}

/// A broken `configs` block does not fail the load
fn parse_configs(value: Value) -> Option<ImportConfigs> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<ImportConfigs>(value) {
        Ok(configs) => Some(configs),
        Err(e) => {
            tracing::warn!("Ignoring malformed configs in payload: {}", e);
            None
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_bare_array() {
        let parsed = parse_payload(&bytes(json!([{"a": 1}, {"a": 2}])), None).unwrap();
        assert_eq!(parsed.collection, None);
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.configs.is_none());
    }

    #[test]
    fn test_single_collection_is_chosen_automatically() {
        let payload = json!({
            "collections": {"books": [{"title": "Dune"}]},
            "configs": {
                "controls_mapping": {"search": "title", "filter1": "- not used -"},
                "views": {"list_view": ["title"]}
            }
        });
        let parsed = parse_payload(&bytes(payload), None).unwrap();
        assert_eq!(parsed.collection.as_deref(), Some("books"));
        assert_eq!(parsed.records, vec![json!({"title": "Dune"})]);

        let configs = parsed.configs.unwrap();
        assert_eq!(configs.controls_mapping.unwrap()["search"], json!("title"));
        assert_eq!(configs.views.unwrap().list_view, Some(vec!["title".to_string()]));
    }

    #[test]
    fn test_several_collections_need_a_name() {
        let payload = bytes(json!({
            "collections": {"books": [], "authors": [{"name": "Herbert"}]}
        }));

        match parse_payload(&payload, None) {
            Err(LoadError::AmbiguousCollection(names)) => {
                assert_eq!(names, vec!["books", "authors"])
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let parsed = parse_payload(&payload, Some("authors")).unwrap();
        assert_eq!(parsed.records.len(), 1);

        assert!(matches!(
            parse_payload(&payload, Some("films")),
            Err(LoadError::CollectionNotFound(name)) if name == "films"
        ));
    }

    #[test]
    fn test_rejected_shapes() {
        for payload in [
            b"not json".to_vec(),
            bytes(json!(42)),
            bytes(json!({"records": []})),
            bytes(json!({"collections": []})),
            bytes(json!({"collections": {}})),
            bytes(json!({"collections": {"books": {"title": "Dune"}}})),
        ] {
            assert!(
                matches!(parse_payload(&payload, None), Err(LoadError::MalformedInput(_))),
                "accepted {}",
                String::from_utf8_lossy(&payload)
            );
        }
    }

    #[test]
    fn test_malformed_configs_are_ignored() {
        let payload = json!({
            "collections": {"books": [{"title": "Dune"}]},
            "configs": {"views": {"list_view": "title"}}
        });
        let parsed = parse_payload(&bytes(payload), None).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.configs.is_none());
    }

    #[tokio::test]
    async fn test_file_source_reports_missing_file() {
        let source = FileSource {
            path: std::env::temp_dir().join("explorer-missing-dataset.json"),
        };
        assert!(matches!(source.read().await, Err(LoadError::Io(_))));
    }
}
