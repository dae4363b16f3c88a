//! Dog store: transactional persistence of hydrated dogs.
//!
//! Each call to [`DogStore::insert_batch`] is one transaction. A batch is
//! committed whole or not at all; a duplicate id anywhere in it rolls back
//! every row of the batch.

use crate::models::Dog;
use crate::Database;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

/// Dog store manager
pub struct DogStore {
    db: Database,
}

impl DogStore {
    /// Create a new dog store on the given database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a batch of dogs in a single transaction
    ///
    /// Returns the number of rows inserted. On any failure the transaction is
    /// dropped without commit, which rolls back the whole batch.
    pub fn insert_batch(&mut self, dogs: &[Dog]) -> Result<usize> {
        let tx = self.db.begin_transaction()?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO Dog (age, breed, id, image_link, name, zip_code)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .context("Failed to prepare dog insert")?;

            for dog in dogs {
                stmt.execute(params![
                    dog.age,
                    dog.breed,
                    dog.id,
                    dog.image_link,
                    dog.name,
                    dog.zip_code,
                ])
                .with_context(|| format!("Failed to insert dog {}", dog.id))?;
            }
        }

        tx.commit().context("Failed to commit dog batch")?;

        info!(count = dogs.len(), "Committed dog batch");
        Ok(dogs.len())
    }

    /// Total number of stored dogs
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .db
            .conn()
            .query_row("SELECT COUNT(*) FROM Dog", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of stored dogs of one breed
    pub fn count_by_breed(&self, breed: &str) -> Result<usize> {
        let count: i64 = self.db.conn().query_row(
            "SELECT COUNT(*) FROM Dog WHERE breed = ?1",
            params![breed],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Look up a dog by id
    pub fn get(&self, id: &str) -> Result<Option<Dog>> {
        let dog = self
            .db
            .conn()
            .query_row(
                "SELECT age, breed, id, image_link, name, zip_code FROM Dog WHERE id = ?1",
                params![id],
                row_to_dog,
            )
            .optional()
            .with_context(|| format!("Failed to query dog {}", id))?;

        if dog.is_none() {
            debug!(id = id, "Dog not found");
        }

        Ok(dog)
    }
}

/// Helper: Convert a database row to a Dog
fn row_to_dog(row: &rusqlite::Row) -> rusqlite::Result<Dog> {
    Ok(Dog {
        age: row.get(0)?,
        breed: row.get(1)?,
        id: row.get(2)?,
        image_link: row.get(3)?,
        name: row.get(4)?,
        zip_code: row.get(5)?,
    })
}
