// Application state management
// Contains the course record and the storage handle shared by every handler

use super::persistence::{CourseStore, JsonFileStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Unique identifier for a course
pub type CourseId = i64;

/// Course structure
/// A course and the emails of the users enrolled in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    /// Unique identifier for the course
    pub id: CourseId,
    /// Display title, matched case-insensitively on lookup
    pub title: String,
    /// Emails of enrolled users, in enrollment order
    #[serde(rename = "enrolledUsers")]
    pub enrolled_users: Vec<String>,
    /// Any other members of the stored object, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Create a course with no enrolled users
    pub fn new(id: CourseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            enrolled_users: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Builder-style helper to pre-populate enrolled users
    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enrolled_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `email` is literally present in the enrolled users
    pub fn is_enrolled(&self, email: &str) -> bool {
        self.enrolled_users.iter().any(|u| u == email)
    }

    /// Case-insensitive title comparison
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Append `email` unless already enrolled
    /// Returns true if the list changed
    pub fn enroll(&mut self, email: &str) -> bool {
        if self.is_enrolled(email) {
            false
        } else {
            self.enrolled_users.push(email.to_string());
            true
        }
    }
}

/// Main application state
///
/// Holds no course data of its own. Every request loads the collection
/// through `store` and, for enrollment, writes it back. No lock guards the
/// read-modify-write cycle, so concurrent enrollments may lose updates.
#[derive(Clone)]
pub struct AppState {
    /// Storage backing the course collection
    pub store: Arc<dyn CourseStore>,
}

/// State handle shared with the axum router
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create application state over any course store
    pub fn new<S: CourseStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create application state backed by a JSON file
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(JsonFileStore::new(path))
    }

    /// Wrap the state for sharing across handlers
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
