// Course persistence module
// Handles loading and saving the course collection

use super::app_state::Course;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;

/// Error types for persistence operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error: {0}")]
    Io(String),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    Json(String),
}

/// Storage for the course collection
///
/// The collection is always read and written as a whole.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Load every course, in stored order
    async fn load(&self) -> Result<Vec<Course>, PersistenceError>;

    /// Replace the stored collection with `courses`
    async fn save(&self, courses: &[Course]) -> Result<(), PersistenceError>;
}

/// Course collection stored as a pretty-printed JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the file at `path`
    /// The file is not touched until the first load or save
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CourseStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Course>, PersistenceError> {
        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| PersistenceError::Io(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_str(&json).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    async fn save(&self, courses: &[Course]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(courses)
            .map_err(|e| PersistenceError::Json(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| PersistenceError::Io(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), count = courses.len(), "Courses written");
        Ok(())
    }
}

/// In-memory course store, used where no file should be involved
#[derive(Debug, Default)]
pub struct InMemoryStore {
    courses: Mutex<Vec<Course>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    /// Create a store seeded with `courses`
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current contents of the store
    pub fn snapshot(&self) -> Vec<Course> {
        self.courses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Course>, PersistenceError> {
        Ok(self.snapshot())
    }

    async fn save(&self, courses: &[Course]) -> Result<(), PersistenceError> {
        *self
            .courses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = courses.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
