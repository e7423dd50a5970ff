use std::path::Path;

use planner_analytics_core::{Tag, Task, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{RecordStore, StoreError, TransactionFilter};

/// Exported planner records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub tags: Vec<Tag>,
    pub transactions: Vec<Transaction>,
}

/// A record store backed by an in-memory [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            tasks = store.snapshot.tasks.len(),
            tags = store.snapshot.tags.len(),
            transactions = store.snapshot.transactions.len(),
            "loaded snapshot"
        );
        Ok(store)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(content: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self::new(snapshot))
    }

    fn user_tasks<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.snapshot
            .tasks
            .iter()
            .filter(move |task| task.user_id == user_id)
    }
}

impl RecordStore for SnapshotStore {
    fn tasks(&self, user_id: &str) -> Result<Vec<Task>, StoreError> {
        Ok(self.user_tasks(user_id).cloned().collect())
    }

    fn tags(&self, user_id: &str) -> Result<Vec<Tag>, StoreError> {
        Ok(self
            .snapshot
            .tags
            .iter()
            .filter(|tag| tag.user_id == user_id)
            .cloned()
            .collect())
    }

    fn tag(&self, user_id: &str, tag_id: &str) -> Result<Option<Tag>, StoreError> {
        Ok(self
            .snapshot
            .tags
            .iter()
            .find(|tag| tag.user_id == user_id && tag.id == tag_id)
            .cloned())
    }

    fn tag_tasks(&self, user_id: &str, tag_id: &str) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .user_tasks(user_id)
            .filter(|task| task.tags.iter().any(|id| id == tag_id))
            .cloned()
            .collect())
    }

    fn transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .find(|tx| tx.user_id == user_id && tx.id == transaction_id)
            .cloned())
    }

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }
}
