//! API module
//!
//! Contains HTTP request handlers for the course directory endpoints

pub mod courses;
pub mod health;
