//! Pipeline error taxonomy.
//!
//! Each variant names the stage that failed; crawl and insert failures also
//! carry the breed being processed.

use thiserror::Error;

/// Failure of one pipeline stage
#[derive(Debug, Error)]
pub enum PopulateError {
    /// Login rejected or unreachable
    #[error("authentication failed")]
    Auth(#[source] anyhow::Error),

    /// Breed list request or decode failed
    #[error("listing breeds failed")]
    ListBreeds(#[source] anyhow::Error),

    /// Database could not be opened or has an incompatible schema
    #[error("initializing database schema failed")]
    Schema(#[source] anyhow::Error),

    /// Id page or hydration request failed
    #[error("crawling breed {breed} failed")]
    Fetch {
        breed: String,
        #[source]
        source: anyhow::Error,
    },

    /// Batch transaction failed and was rolled back
    #[error("inserting breed {breed} failed")]
    Persist {
        breed: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PopulateError {
    /// Short name of the failed stage
    pub fn stage(&self) -> &'static str {
        match self {
            PopulateError::Auth(_) => "authenticate",
            PopulateError::ListBreeds(_) => "list_breeds",
            PopulateError::Schema(_) => "init_schema",
            PopulateError::Fetch { .. } => "crawl",
            PopulateError::Persist { .. } => "insert",
        }
    }

    /// Breed being processed when the error occurred
    pub fn breed(&self) -> Option<&str> {
        match self {
            PopulateError::Fetch { breed, .. } | PopulateError::Persist { breed, .. } => {
                Some(breed.as_str())
            }
            _ => None,
        }
    }
}
