//! Per-breed crawl: page through ids, hydrate each page, pause in between.

use crate::api::{DogApi, JitterDelay, PAGE_SIZE};
use crate::error::PopulateError;
use anyhow::Context;
use shared::Dog;
use tracing::{debug, info};

/// Everything fetched for one breed
#[derive(Debug, Clone, Default)]
pub struct BreedCrawl {
    pub dogs: Vec<Dog>,
    /// Id pages requested, the terminal empty page included
    pub pages: usize,
}

/// Fetch every dog of a breed
///
/// Pages are requested at offsets 0, 100, 200, ... until an empty page comes
/// back. Each non-empty page is hydrated and followed by one pause; the empty
/// page is not. The first failure aborts the breed.
pub async fn crawl_breed<A: DogApi + ?Sized>(
    api: &A,
    breed: &str,
    pacer: &mut JitterDelay,
) -> Result<BreedCrawl, PopulateError> {
    crawl_pages(api, breed, pacer)
        .await
        .map_err(|source| PopulateError::Fetch {
            breed: breed.to_string(),
            source,
        })
}

async fn crawl_pages<A: DogApi + ?Sized>(
    api: &A,
    breed: &str,
    pacer: &mut JitterDelay,
) -> anyhow::Result<BreedCrawl> {
    let mut crawl = BreedCrawl::default();
    let mut from = 0;

    loop {
        let ids = api
            .search_ids(breed, from)
            .await
            .with_context(|| format!("Failed to fetch ids at offset {}", from))?;
        crawl.pages += 1;

        if ids.is_empty() {
            break;
        }

        let dogs = api
            .fetch_dogs(&ids)
            .await
            .with_context(|| format!("Failed to hydrate {} dogs at offset {}", ids.len(), from))?;

        debug!(breed = breed, from = from, fetched = dogs.len(), "Hydrated page");
        crawl.dogs.extend(dogs);

        from += PAGE_SIZE;
        pacer.pause().await;
    }

    info!(
        breed = breed,
        pages = crawl.pages,
        dogs = crawl.dogs.len(),
        "Fetched dogs for breed"
    );

    Ok(crawl)
}
