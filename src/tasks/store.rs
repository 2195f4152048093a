// Task registry
// In-memory map of task id -> record, shared between handlers and pipeline runs

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::design::{DesignState, GeneratedImage};

/// Unique identifier for a generation task
pub type TaskId = String;

/// Progress of a generation task
///
/// Serialized as the human-readable message the frontend displays; the two
/// terminal states serialize as `completed` and `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Task registered, pipeline not started yet
    Initializing,
    /// Building the planning prompt
    Analyzing,
    /// Waiting for the planning model
    Evolving,
    /// Rendering images
    Rendering,
    /// All images rendered and stored
    Completed,
    /// Pipeline aborted; see `error`
    Failed,
}

impl TaskStatus {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Initializing => "Initializing...",
            TaskStatus::Analyzing => "Analyzing your vision...",
            TaskStatus::Evolving => "Evolving your LIVIN DNA...",
            TaskStatus::Rendering => "Generating Earth & Mars visions...",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    /// Whether the task has stopped changing
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// State of one generation task, as returned by the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Task ID
    pub id: TaskId,
    /// Round of the state this task works on (updated once planning returns)
    pub round: u32,
    /// Current progress
    pub status: TaskStatus,
    /// Rendered Earth images, in plan order
    pub earth_images: Vec<GeneratedImage>,
    /// Rendered Mars images, in plan order
    pub mars_images: Vec<GeneratedImage>,
    /// Input state, replaced by the evolved state once planning returns
    pub updated_state: DesignState,
    /// Failure message, only set when `status` is `failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the task was registered
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    fn new(id: TaskId, state: &DesignState) -> Self {
        Self {
            id,
            round: state.round(),
            status: TaskStatus::Initializing,
            earth_images: Vec::new(),
            mars_images: Vec::new(),
            updated_state: state.clone(),
            error: None,
            created_at: Utc::now(),
        }
    }
}

/// Shared task registry
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new task for `state` and return its ID
    pub async fn create(&self, state: &DesignState) -> TaskId {
        let id = Uuid::new_v4().to_string();
        let record = TaskRecord::new(id.clone(), state);
        self.tasks.write().await.insert(id.clone(), record);
        id
    }

    /// Snapshot of a task
    pub async fn get(&self, id: &str) -> Option<TaskRecord> {
        self.tasks.read().await.get(id).cloned()
    }

    /// Apply `f` to a task
    ///
    /// Returns false if the task does not exist.
    pub async fn update<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut TaskRecord),
    {
        match self.tasks.write().await.get_mut(id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    /// Move a task to `status`
    pub async fn set_status(&self, id: &str, status: TaskStatus) -> bool {
        tracing::debug!(task_id = %id, status = %status, "Task status changed");
        self.update(id, |record| record.status = status).await
    }

    /// Number of registered tasks
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether no task has been registered
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_initial_record() {
        let store = TaskStore::new();
        let state: DesignState = serde_json::from_value(json!({"round": 2, "livin_dna": ["a"]})).unwrap();

        let id = store.create(&state).await;
        let record = store.get(&id).await.expect("task should exist");

        assert_eq!(record.id, id);
        assert_eq!(record.round, 2);
        assert_eq!(record.status, TaskStatus::Initializing);
        assert!(record.earth_images.is_empty());
        assert!(record.mars_images.is_empty());
        assert_eq!(record.updated_state, state);
        assert!(record.error.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = TaskStore::new();
        let a = store.create(&DesignState::new()).await;
        let b = store.create(&DesignState::new()).await;
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_unknown_task() {
        let store = TaskStore::new();
        assert!(!store.set_status("nope", TaskStatus::Failed).await);
        assert!(store.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_record_json_shape() {
        let store = TaskStore::new();
        let id = store.create(&DesignState::new()).await;
        store.set_status(&id, TaskStatus::Rendering).await;

        let value = serde_json::to_value(store.get(&id).await.unwrap()).unwrap();
        assert_eq!(value["status"], "Generating Earth & Mars visions...");
        assert_eq!(value["round"], 0);
        assert_eq!(value["earth_images"], json!([]));
        assert!(value.get("error").is_none());

        store
            .update(&id, |r| {
                r.status = TaskStatus::Failed;
                r.error = Some("boom".into());
            })
            .await;
        let value = serde_json::to_value(store.get(&id).await.unwrap()).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Evolving.is_terminal());
    }
}
