//! Pipeline driver.
//!
//! Coordinates the whole run: log in, list breeds, open the database, then
//! crawl and insert one breed at a time. The first failure stops the run;
//! breeds committed before it stay in the database.

use crate::api::{DogApi, JitterDelay, Session};
use crate::crawler::crawl_breed;
use crate::error::PopulateError;
use shared::{Config, Database, DogStore};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Statistics for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateStats {
    pub breeds: usize,
    pub pages: usize,
    pub dogs_fetched: usize,
    pub dogs_inserted: usize,
}

/// Run the complete pipeline described by `config`
pub async fn run(config: &Config) -> Result<PopulateStats, PopulateError> {
    let session = Session::login(&config.api)
        .await
        .map_err(PopulateError::Auth)?;

    let mut populator = Populator::new(&session, JitterDelay::from_config(&config.pacing))
        .with_token_lifetime(Duration::from_secs(config.api.token_lifetime_seconds));

    populator.run(config.database_path()).await
}

/// Crawls every breed through an authenticated API and stores the results
pub struct Populator<'a, A: DogApi + ?Sized> {
    api: &'a A,
    pacer: JitterDelay,
    token_lifetime: Option<Duration>,
}

impl<'a, A: DogApi + ?Sized> Populator<'a, A> {
    /// Create a populator over an already authenticated API
    pub fn new(api: &'a A, pacer: JitterDelay) -> Self {
        Self {
            api,
            pacer,
            token_lifetime: None,
        }
    }

    /// Warn once the session outlives this lifetime
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    /// Pauses taken so far by the crawler
    pub fn pauses(&self) -> u64 {
        self.pacer.pauses()
    }

    /// List breeds, open the store at `db_path`, then crawl and insert each breed
    pub async fn run(&mut self, db_path: impl AsRef<Path>) -> Result<PopulateStats, PopulateError> {
        let mut stats = PopulateStats::default();

        info!("Listing breeds");
        let breeds = self
            .api
            .list_breeds()
            .await
            .map_err(PopulateError::ListBreeds)?;
        stats.breeds = breeds.len();
        info!(breeds = breeds.len(), "Discovered breeds");

        let db_path = db_path.as_ref();
        info!(db_path = %db_path.display(), "Opening database");
        let database = Database::open(db_path).map_err(PopulateError::Schema)?;
        let mut store = DogStore::new(database);

        for (idx, breed) in breeds.iter().enumerate() {
            self.check_session_age();

            info!(
                progress = format!("{}/{}", idx + 1, breeds.len()),
                breed = %breed,
                "Crawling breed"
            );
            let crawl = crawl_breed(self.api, breed, &mut self.pacer).await?;
            stats.pages += crawl.pages;
            stats.dogs_fetched += crawl.dogs.len();

            info!(breed = %breed, dogs = crawl.dogs.len(), "Inserting breed");
            let inserted = store
                .insert_batch(&crawl.dogs)
                .map_err(|source| PopulateError::Persist {
                    breed: breed.clone(),
                    source,
                })?;
            stats.dogs_inserted += inserted;
        }

        info!(
            breeds = stats.breeds,
            pages = stats.pages,
            dogs_fetched = stats.dogs_fetched,
            dogs_inserted = stats.dogs_inserted,
            "Population complete"
        );

        Ok(stats)
    }

    fn check_session_age(&self) {
        let (Some(lifetime), Some(age)) = (self.token_lifetime, self.api.session_age()) else {
            return;
        };

        if age.to_std().map_or(false, |age| age >= lifetime) {
            warn!(
                age_seconds = age.num_seconds(),
                lifetime_seconds = lifetime.as_secs(),
                "Session has outlived its token lifetime; requests will likely be rejected"
            );
        }
    }
}
