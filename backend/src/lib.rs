//! Course Directory Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod services;
/// Application state management
///
/// Handles the course model, the storage handle, and persistence.
pub mod state;
