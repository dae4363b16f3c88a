//! Dog API client implementation.
//!
//! This module provides the cookie-session client for the remote dog API,
//! its wire types, and the jittered pause taken between page fetches.

pub mod client;
pub mod pacer;
pub mod types;

pub use client::Session;
pub use pacer::JitterDelay;
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;
use shared::Dog;

/// Number of ids requested per search page
pub const PAGE_SIZE: usize = 100;

pub const LOGIN_PATH: &str = "/auth/login";
pub const BREEDS_PATH: &str = "/dogs/breeds";
pub const SEARCH_PATH: &str = "/dogs/search";
pub const DOGS_PATH: &str = "/dogs";

/// Authenticated operations against the dog API
///
/// [`Session`] is the production implementation. Every operation runs in the
/// context of the session it is called on.
#[async_trait]
pub trait DogApi: Send + Sync {
    /// Fetch every breed label
    async fn list_breeds(&self) -> Result<Vec<String>>;

    /// Fetch one page of dog ids for a breed, starting at `from`
    ///
    /// An empty page means the breed has no more dogs.
    async fn search_ids(&self, breed: &str, from: usize) -> Result<Vec<String>>;

    /// Hydrate a list of ids into full records in one round trip
    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>>;

    /// Time since the session was established, when known
    fn session_age(&self) -> Option<chrono::Duration> {
        None
    }
}
