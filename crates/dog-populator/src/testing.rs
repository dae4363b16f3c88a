//! In-memory dog API used by unit tests.

use crate::api::{DogApi, PAGE_SIZE};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::Dog;
use std::sync::Mutex;

pub(crate) fn dog(id: &str, breed: &str, age: u8) -> Dog {
    Dog {
        age,
        breed: breed.to_string(),
        id: id.to_string(),
        image_link: format!("https://example.com/{}.jpg", id),
        name: format!("Dog {}", id),
        zip_code: "12345".to_string(),
    }
}

/// Serves a fixed set of breeds and dogs, recording every call
#[derive(Default)]
pub(crate) struct FixtureApi {
    breeds: Vec<(String, Vec<Dog>)>,
    fail_listing: bool,
    fail_search: Option<String>,
    fail_hydrate: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FixtureApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a breed with `count` generated dogs
    pub(crate) fn with_breed(self, breed: &str, count: usize) -> Self {
        let dogs = (0..count)
            .map(|i| dog(&format!("{}-{}", breed, i), breed, (i % 20) as u8))
            .collect();
        self.with_dogs(breed, dogs)
    }

    pub(crate) fn with_dogs(mut self, breed: &str, dogs: Vec<Dog>) -> Self {
        self.breeds.push((breed.to_string(), dogs));
        self
    }

    pub(crate) fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub(crate) fn failing_search(mut self, breed: &str) -> Self {
        self.fail_search = Some(breed.to_string());
        self
    }

    pub(crate) fn failing_hydrate(mut self, breed: &str) -> Self {
        self.fail_hydrate = Some(breed.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn all_dogs(&self) -> impl Iterator<Item = &Dog> {
        self.breeds.iter().flat_map(|(_, dogs)| dogs.iter())
    }
}

#[async_trait]
impl DogApi for FixtureApi {
    async fn list_breeds(&self) -> Result<Vec<String>> {
        self.record("list".to_string());
        if self.fail_listing {
            return Err(anyhow!("GET /dogs/breeds 503 Service Unavailable"));
        }
        Ok(self.breeds.iter().map(|(breed, _)| breed.clone()).collect())
    }

    async fn search_ids(&self, breed: &str, from: usize) -> Result<Vec<String>> {
        self.record(format!("search {} {}", breed, from));

        if self.fail_search.as_deref() == Some(breed) {
            return Err(anyhow!("GET /dogs/search 401 Unauthorized"));
        }

        let dogs = self
            .breeds
            .iter()
            .find(|(name, _)| name == breed)
            .map(|(_, dogs)| dogs.as_slice())
            .unwrap_or_default();

        Ok(dogs
            .iter()
            .skip(from)
            .take(PAGE_SIZE)
            .map(|d| d.id.clone())
            .collect())
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        self.record(format!("hydrate {}", ids.len()));

        let dogs: Vec<Dog> = ids
            .iter()
            .filter_map(|id| self.all_dogs().find(|d| &d.id == id).cloned())
            .collect();

        if let Some(breed) = &self.fail_hydrate {
            if dogs.iter().any(|d| &d.breed == breed) {
                return Err(anyhow!("Failed to decode response of POST /dogs"));
            }
        }

        Ok(dogs)
    }
}
