use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::error::Error;
use crate::owner::Owner;

/// File-backed persistence for the owner collection.
///
/// The whole collection lives in one JSON document that is read in full and
/// overwritten in full. Mutations go through [`Storage::mutate`], which holds
/// a lock across load, transform and save so concurrent writers cannot lose
/// each other's updates. Writes are plain overwrites, not atomic renames.
pub struct Storage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Storage {
    pub fn new(path: PathBuf) -> Self {
        Storage {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads and parses the whole collection.
    pub async fn load(&self) -> Result<Vec<Owner>, Error> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, owners: &[Owner]) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(owners)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    /// Loads the collection, applies `transform` and saves the result,
    /// all under the write lock. Nothing is saved if `transform` fails.
    pub async fn mutate<T>(
        &self,
        transform: impl FnOnce(&mut Vec<Owner>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let _guard = self.write_lock.lock().await;
        let mut owners = self.load().await?;
        let out = transform(&mut owners)?;
        self.save(&owners).await?;
        Ok(out)
    }

    /// Overwrites the stored collection without reading it first.
    pub async fn replace(&self, owners: Vec<Owner>) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;
        self.save(&owners).await
    }
}
