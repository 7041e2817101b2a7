use contracts::usecases::u501_load_dataset::{LoadProgress, LoadStatus, LoadSummary};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

/// Finished loads are kept this long for polling
const RETAIN_FINISHED_HOURS: i64 = 24;

/// In-memory progress of dataset loads, polled by the client
#[derive(Clone, Default)]
pub struct ProgressTracker {
    loads: Arc<RwLock<HashMap<String, LoadProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_load(&self, load_id: String, source: String) {
        self.cleanup_old_loads(RETAIN_FINISHED_HOURS);
        self.write()
            .insert(load_id.clone(), LoadProgress::new(load_id, source));
    }

    /// Forget finished loads older than `max_age_hours`; running loads stay
    pub fn cleanup_old_loads(&self, max_age_hours: i64) {
        let now = chrono::Utc::now();
        self.write().retain(|_, progress| match progress.completed_at {
            Some(completed_at) => (now - completed_at).num_hours() < max_age_hours,
            None => true,
        });
    }

    pub fn get_progress(&self, load_id: &str) -> Option<LoadProgress> {
        self.loads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(load_id)
            .cloned()
    }

    /// Source read, parsing starts
    pub fn mark_parsing(&self, load_id: &str, bytes_read: usize) {
        self.update(load_id, |progress| {
            progress.status = LoadStatus::Parsing;
            progress.bytes_read = bytes_read;
        });
    }

    pub fn complete(&self, load_id: &str, summary: LoadSummary) {
        self.update(load_id, |progress| {
            progress.status = LoadStatus::Completed;
            progress.summary = Some(summary);
            progress.completed_at = Some(chrono::Utc::now());
        });
    }

    pub fn fail(&self, load_id: &str, error: String) {
        self.update(load_id, |progress| {
            progress.status = LoadStatus::Failed;
            progress.error_message = Some(error);
            progress.completed_at = Some(chrono::Utc::now());
        });
    }

    fn update(&self, load_id: &str, apply: impl FnOnce(&mut LoadProgress)) {
        if let Some(progress) = self.write().get_mut(load_id) {
            apply(progress);
            progress.updated_at = chrono::Utc::now();
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, LoadProgress>> {
        self.loads.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_lifecycle() {
        let tracker = ProgressTracker::new();
        tracker.create_load("l1".to_string(), "upload".to_string());
        assert_eq!(tracker.get_progress("l1").unwrap().status, LoadStatus::Reading);

        tracker.mark_parsing("l1", 128);
        let progress = tracker.get_progress("l1").unwrap();
        assert_eq!(progress.status, LoadStatus::Parsing);
        assert_eq!(progress.bytes_read, 128);

        tracker.fail("l1", "Malformed input".to_string());
        let progress = tracker.get_progress("l1").unwrap();
        assert_eq!(progress.status, LoadStatus::Failed);
        assert_eq!(progress.error_message.as_deref(), Some("Malformed input"));
        assert!(progress.completed_at.is_some());
    }

    #[test]
    fn test_unknown_load_is_ignored() {
        let tracker = ProgressTracker::new();
        tracker.fail("missing", "boom".to_string());
        assert!(tracker.get_progress("missing").is_none());
    }

    #[test]
    fn test_finished_loads_are_cleaned_up() {
        let tracker = ProgressTracker::new();
        tracker.create_load("old".to_string(), "upload".to_string());
        tracker.fail("old", "boom".to_string());
        tracker.create_load("running".to_string(), "upload".to_string());

        if let Some(progress) = tracker.write().get_mut("old") {
            progress.completed_at = Some(chrono::Utc::now() - chrono::Duration::hours(25));
        }

        tracker.create_load("new".to_string(), "upload".to_string());
        assert!(tracker.get_progress("old").is_none());
        assert!(tracker.get_progress("running").is_some());
        assert!(tracker.get_progress("new").is_some());
    }
}
