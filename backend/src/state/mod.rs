// State management module
// Handles the course model, the shared storage handle, and persistence

pub mod app_state;
pub mod persistence;

pub use app_state::{AppState, Course, CourseId, SharedState};
pub use persistence::{CourseStore, InMemoryStore, JsonFileStore, PersistenceError};
