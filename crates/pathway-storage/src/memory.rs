use async_trait::async_trait;
use tokio::sync::RwLock;

use pathway_core::catalog::Catalog;
use pathway_core::directory::Directory;
use pathway_core::models::response::ResponseRecord;
use pathway_core::models::{QuestionId, UserId};
use pathway_core::s3_keys;

use crate::error::StorageError;
use crate::store::{Store, Versioned};

/// In-process store for tests and local runs. Versions are counters.
#[derive(Default)]
pub struct MemoryStore {
    catalog: RwLock<Slot<Catalog>>,
    directory: RwLock<Slot<Directory>>,
    responses: RwLock<Vec<ResponseRecord>>,
}

struct Slot<T> {
    value: T,
    version: Option<u64>,
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            version: None,
        }
    }
}

impl<T: Clone> Slot<T> {
    fn load(&self) -> Versioned<T> {
        Versioned {
            value: self.value.clone(),
            etag: self.version.map(|v| v.to_string()),
        }
    }

    fn save(&mut self, value: &T, etag: Option<&str>, key: &str) -> Result<String, StorageError> {
        let current = self.version.map(|v| v.to_string());
        if current.as_deref() != etag {
            return Err(StorageError::PreconditionFailed {
                key: key.to_string(),
            });
        }
        let next = self.version.map_or(1, |v| v + 1);
        self.value = value.clone();
        self.version = Some(next);
        Ok(next.to_string())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load_catalog(&self) -> Result<Versioned<Catalog>, StorageError> {
        Ok(self.catalog.read().await.load())
    }

    async fn save_catalog(
        &self,
        catalog: &Catalog,
        etag: Option<&str>,
    ) -> Result<String, StorageError> {
        self.catalog
            .write()
            .await
            .save(catalog, etag, s3_keys::CATALOG)
    }

    async fn load_directory(&self) -> Result<Versioned<Directory>, StorageError> {
        Ok(self.directory.read().await.load())
    }

    async fn save_directory(
        &self,
        directory: &Directory,
        etag: Option<&str>,
    ) -> Result<String, StorageError> {
        self.directory
            .write()
            .await
            .save(directory, etag, s3_keys::DIRECTORY)
    }

    async fn append_response(&self, record: &ResponseRecord) -> Result<(), StorageError> {
        self.responses.write().await.push(record.clone());
        Ok(())
    }

    async fn list_responses(
        &self,
        question_id: QuestionId,
        user_id: UserId,
    ) -> Result<Vec<ResponseRecord>, StorageError> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.question_id == question_id && r.user_id == user_id)
            .cloned()
            .collect())
    }
}
