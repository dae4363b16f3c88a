//! Dog populator library.
//!
//! Logs in to the dog API, crawls every breed page by page, and stores the
//! hydrated dogs in SQLite with one transaction per breed.

pub mod api;
pub mod crawler;
pub mod error;
pub mod populator;

#[cfg(test)]
mod testing;

pub use api::{DogApi, JitterDelay, Session};
pub use crawler::{crawl_breed, BreedCrawl};
pub use error::PopulateError;
pub use populator::{run, PopulateStats, Populator};
