use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use contracts::shared::explorer::{
    ApplyConfigRequest, ExplorerConfig, ExportPayload, ImportConfigs, LiveInputsRequest,
    LiveSnapshot, QueryRequest, QueryResponse, RoleMapping, ViewSelection,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use super::catalog::FieldCatalog;
use super::query_engine::{self, parse_sort, QueryContext, QueryError};
use super::{role_mapping, view_selection};
use crate::shared::debounce::Debouncer;

/// Collection name used when exporting a dataset loaded from a bare array
pub const DEFAULT_COLLECTION: &str = "items";

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("No dataset loaded")]
    NoDataset,

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// One loaded dataset with its catalog and the current configuration.
///
/// Dataset and catalog never change after construction; `with_config`
/// shares them with the new value.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    pub collection: Option<String>,
    pub dataset: Arc<Vec<Value>>,
    pub catalog: Arc<FieldCatalog>,
    pub mapping: RoleMapping,
    pub selection: ViewSelection,
    pub loaded_at: DateTime<Utc>,
}

impl ExplorerSession {
    /// Build catalog, then defaults overlaid with an imported configuration
    pub fn new(
        collection: Option<String>,
        records: Vec<Value>,
        configs: Option<&ImportConfigs>,
    ) -> Self {
        let catalog = FieldCatalog::build(&records);
        let mapping = role_mapping::from_import(configs, &catalog);
        let selection = view_selection::from_import(configs, &catalog);

        Self {
            collection,
            dataset: Arc::new(records),
            catalog: Arc::new(catalog),
            mapping,
            selection,
            loaded_at: Utc::now(),
        }
    }

    /// Validate an "apply" action against this dataset
    pub fn with_config(&self, request: &ApplyConfigRequest) -> Self {
        Self {
            mapping: role_mapping::validate(&request.mapping, &self.catalog),
            selection: view_selection::resolve(
                &request.list_fields,
                &request.detail_fields,
                &self.catalog,
            ),
            ..self.clone()
        }
    }

    pub fn context(&self) -> QueryContext<'_> {
        QueryContext {
            dataset: &self.dataset,
            catalog: &self.catalog,
            mapping: &self.mapping,
            selection: &self.selection,
        }
    }

    pub fn config(&self) -> ExplorerConfig {
        ExplorerConfig {
            mapping: self.mapping.clone(),
            selection: self.selection.clone(),
        }
    }

    /// Run a query; the random sort draws from the thread RNG
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
        query_engine::run(&self.context(), request, &mut rand::thread_rng())
    }

    /// Collections payload that re-imports to this dataset and configuration
    pub fn export(&self) -> ExportPayload {
        let name = self
            .collection
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let mut collections = Map::new();
        collections.insert(name, Value::Array(self.dataset.to_vec()));

        ExportPayload {
            collections,
            configs: self.config().to_import_configs(),
        }
    }
}

#[derive(Debug, Default)]
struct LiveState {
    query: QueryRequest,
    generation: u64,
    snapshot: Option<LiveSnapshot>,
}

/// Holder of the current session: the one swap point between loads, applies and queries.
///
/// A load replaces the whole session atomically; the last load to complete wins.
/// The live query (search text, filters, sort) is reset on every load.
pub struct SessionStore {
    current: RwLock<Option<Arc<ExplorerSession>>>,
    live: Mutex<LiveState>,
    search_debouncer: Debouncer,
}

impl SessionStore {
    pub fn new(search_debounce: Duration) -> Self {
        Self {
            current: RwLock::new(None),
            live: Mutex::new(LiveState::default()),
            search_debouncer: Debouncer::new(search_debounce),
        }
    }

    pub async fn current(&self) -> Result<Arc<ExplorerSession>, ExplorerError> {
        self.current.read().await.clone().ok_or(ExplorerError::NoDataset)
    }

    /// Swap in a freshly loaded session
    pub async fn install(&self, session: ExplorerSession) {
        let session = Arc::new(session);
        tracing::info!(
            "Installing dataset: {} records, {} fields",
            session.dataset.len(),
            session.catalog.len()
        );
        *self.current.write().await = Some(session);

        self.search_debouncer.cancel();
        let mut live = self.live.lock().await;
        live.query = QueryRequest::default();
        self.rerun_locked(&mut live).await;
    }

    /// Validate and install the user's mapping and view choices.
    ///
    /// Filter values of the live query are cleared, and its sort is dropped
    /// unless the new mapping still offers it.
    pub async fn apply_config(
        &self,
        request: &ApplyConfigRequest,
    ) -> Result<ExplorerConfig, ExplorerError> {
        let updated = {
            let mut current = self.current.write().await;
            let session = current.as_ref().ok_or(ExplorerError::NoDataset)?;
            let updated = Arc::new(session.with_config(request));
            *current = Some(Arc::clone(&updated));
            updated
        };

        let mut live = self.live.lock().await;
        live.query.filter_values.clear();
        if !sort_still_offered(live.query.sort.as_deref(), &updated) {
            tracing::debug!("Live sort {:?} no longer offered, reset", live.query.sort);
            live.query.sort = None;
        }
        self.rerun_locked(&mut live).await;
        Ok(updated.config())
    }

    /// Debounced search-text update of the live query
    pub fn schedule_live_search(self: &Arc<Self>, text: String) {
        let store = Arc::clone(self);
        self.search_debouncer.schedule(async move {
            let mut live = store.live.lock().await;
            live.query.search_text = text;
            store.rerun_locked(&mut live).await;
        });
    }

    /// Immediate filter/sort update of the live query
    pub async fn set_live_inputs(
        &self,
        inputs: LiveInputsRequest,
    ) -> Result<Option<LiveSnapshot>, ExplorerError> {
        parse_sort(inputs.sort.as_deref())?;

        let mut live = self.live.lock().await;
        live.query.filter_values = inputs.filter_values;
        live.query.sort = inputs.sort;
        self.rerun_locked(&mut live).await;
        Ok(live.snapshot.clone())
    }

    pub async fn live_snapshot(&self) -> Option<LiveSnapshot> {
        self.live.lock().await.snapshot.clone()
    }

    async fn rerun_locked(&self, live: &mut LiveState) {
        let Some(session) = self.current.read().await.clone() else {
            return;
        };

        let result = match session.query(&live.query) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Live query failed: {}", e);
                return;
            }
        };

        live.generation += 1;
        tracing::debug!(
            "Live query generation {}: {} of {} records",
            live.generation,
            result.total,
            session.dataset.len()
        );
        live.snapshot = Some(LiveSnapshot {
            generation: live.generation,
            query: live.query.clone(),
            result,
            updated_at: Utc::now(),
        });
    }
}

/// Whether a wire sort value is among the sort options of `session`
fn sort_still_offered(sort: Option<&str>, session: &ExplorerSession) -> bool {
    let Ok(Some(choice)) = parse_sort(sort) else {
        return false;
    };
    let value = choice.to_string();
    query_engine::sort_options(&session.mapping, &session.catalog)
        .iter()
        .any(|option| option.value == value)
}
