//! Shared library for the dog populator.
//!
//! This crate provides the pieces the populator binary builds on:
//! - Configuration management
//! - The SQLite handle and its schema
//! - The dog store (transactional batch inserts)
//! - Data models
//! - Logging infrastructure

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use logging::LogConfig;
pub use models::*;
pub use store::DogStore;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
