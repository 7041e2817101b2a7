use super::loader::{parse_payload, FileSource, LoadError, PayloadSource};
use super::progress_tracker::ProgressTracker;
use crate::shared::explorer::{ExplorerSession, SessionStore};
use contracts::usecases::u501_load_dataset::{
    LoadProgress, LoadRequest, LoadResponse, LoadStartStatus, LoadSummary,
};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Executor for the dataset load usecase.
///
/// A load reads and parses the payload, builds the catalog and the imported
/// configuration, then swaps the session. Nothing is installed on failure.
pub struct LoadExecutor {
    store: Arc<SessionStore>,
    pub progress_tracker: Arc<ProgressTracker>,
}

impl LoadExecutor {
    pub fn new(store: Arc<SessionStore>, progress_tracker: Arc<ProgressTracker>) -> Self {
        Self {
            store,
            progress_tracker,
        }
    }

    /// Load and wait for the new dataset to be installed
    pub async fn load_now(
        &self,
        source: &dyn PayloadSource,
        collection: Option<String>,
    ) -> Result<LoadResponse, LoadError> {
        let load_id = Uuid::new_v4().to_string();
        self.progress_tracker
            .create_load(load_id.clone(), source.describe());

        match self.execute(&load_id, source, collection).await {
            Ok(summary) => Ok(LoadResponse {
                load_id,
                status: LoadStartStatus::Completed,
                message: format!("Loaded {} records", summary.record_count),
                summary: Some(summary),
            }),
            Err(e) => {
                self.progress_tracker.fail(&load_id, e.to_string());
                Err(e)
            }
        }
    }

    /// Start a background load from a file and return its load id at once
    pub fn start_load(self: &Arc<Self>, request: LoadRequest) -> LoadResponse {
        let load_id = Uuid::new_v4().to_string();
        let source = FileSource {
            path: PathBuf::from(&request.path),
        };
        self.progress_tracker
            .create_load(load_id.clone(), source.describe());

        let executor = Arc::clone(self);
        let id = load_id.clone();
        tokio::spawn(async move {
            if let Err(e) = executor.execute(&id, &source, request.collection).await {
                tracing::error!("Dataset load {} failed: {}", id, e);
                executor.progress_tracker.fail(&id, e.to_string());
            }
        });

        LoadResponse {
            load_id,
            status: LoadStartStatus::Started,
            message: "Load started".to_string(),
            summary: None,
        }
    }

    pub fn get_progress(&self, load_id: &str) -> Option<LoadProgress> {
        self.progress_tracker.get_progress(load_id)
    }

    async fn execute(
        &self,
        load_id: &str,
        source: &dyn PayloadSource,
        collection: Option<String>,
    ) -> Result<LoadSummary, LoadError> {
        tracing::info!("Load {}: reading {}", load_id, source.describe());
        let bytes = source.read().await?;
        self.progress_tracker.mark_parsing(load_id, bytes.len());

        let (session, config_imported) = tokio::task::spawn_blocking(move || {
            let parsed = parse_payload(&bytes, collection.as_deref())?;
            let config_imported = parsed.configs.is_some();
            let session =
                ExplorerSession::new(parsed.collection, parsed.records, parsed.configs.as_ref());
            Ok::<_, LoadError>((session, config_imported))
        })
        .await
        .map_err(|e| LoadError::Io(std::io::Error::other(e)))??;

        let summary = LoadSummary {
            collection: session.collection.clone(),
            record_count: session.dataset.len(),
            field_count: session.catalog.len(),
            config_imported,
        };

        self.store.install(session).await;
        self.progress_tracker.complete(load_id, summary.clone());
        tracing::info!(
            "Load {} completed: {} records, {} fields",
            load_id,
            summary.record_count,
            summary.field_count
        );

        Ok(summary)
    }
}
