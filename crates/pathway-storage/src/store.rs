use async_trait::async_trait;
use tracing::{info, warn};

use pathway_core::catalog::Catalog;
use pathway_core::directory::Directory;
use pathway_core::models::response::ResponseRecord;
use pathway_core::models::{QuestionId, UserId};
use pathway_core::s3_keys;

use crate::error::StorageError;

/// How many times a document update is retried after losing a write race.
pub const MAX_ATTEMPTS: usize = 5;

/// A document together with the version it was read at.
///
/// `etag` is `None` when the document has never been saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub etag: Option<String>,
}

/// The persistence collaborator.
///
/// Documents are saved compare-and-swap: a save whose `etag` no longer
/// matches the stored version fails with `StorageError::PreconditionFailed`
/// and changes nothing. Implementations must be `Send + Sync + 'static` to
/// live in axum application state.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    async fn load_catalog(&self) -> Result<Versioned<Catalog>, StorageError>;

    /// Returns the new ETag.
    async fn save_catalog(
        &self,
        catalog: &Catalog,
        etag: Option<&str>,
    ) -> Result<String, StorageError>;

    async fn load_directory(&self) -> Result<Versioned<Directory>, StorageError>;

    /// Returns the new ETag.
    async fn save_directory(
        &self,
        directory: &Directory,
        etag: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Record one submission. Earlier submissions are kept.
    async fn append_response(&self, record: &ResponseRecord) -> Result<(), StorageError>;

    /// Every submission of `user_id` for `question_id`, oldest first.
    async fn list_responses(
        &self,
        question_id: QuestionId,
        user_id: UserId,
    ) -> Result<Vec<ResponseRecord>, StorageError>;
}

/// A versioned document kept behind a [`Store`].
#[async_trait]
trait Document: Sized + Send + Sync {
    const KEY: &'static str;

    async fn load(store: &dyn Store) -> Result<Versioned<Self>, StorageError>;

    async fn save(&self, store: &dyn Store, etag: Option<&str>) -> Result<String, StorageError>;
}

#[async_trait]
impl Document for Catalog {
    const KEY: &'static str = s3_keys::CATALOG;

    async fn load(store: &dyn Store) -> Result<Versioned<Self>, StorageError> {
        store.load_catalog().await
    }

    async fn save(&self, store: &dyn Store, etag: Option<&str>) -> Result<String, StorageError> {
        store.save_catalog(self, etag).await
    }
}

#[async_trait]
impl Document for Directory {
    const KEY: &'static str = s3_keys::DIRECTORY;

    async fn load(store: &dyn Store) -> Result<Versioned<Self>, StorageError> {
        store.load_directory().await
    }

    async fn save(&self, store: &dyn Store, etag: Option<&str>) -> Result<String, StorageError> {
        store.save_directory(self, etag).await
    }
}

/// Load a document, apply `apply`, and save it back if nobody else wrote in
/// between. An error from `apply` aborts without saving.
async fn update_document<D, T, E, F>(store: &dyn Store, mut apply: F) -> Result<T, E>
where
    D: Document,
    F: FnMut(&mut D) -> Result<T, E> + Send,
    T: Send,
    E: From<StorageError>,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let Versioned { mut value, etag } = D::load(store).await?;
        let out = apply(&mut value)?;
        match value.save(store, etag.as_deref()).await {
            Ok(new_etag) => {
                info!(key = D::KEY, etag = %new_etag, "document saved");
                return Ok(out);
            }
            Err(StorageError::PreconditionFailed { .. }) => {
                warn!(key = D::KEY, attempt, "document changed concurrently, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(StorageError::Contention {
        key: D::KEY.to_string(),
        attempts: MAX_ATTEMPTS,
    }
    .into())
}

/// Run `apply` against the latest catalog and commit it compare-and-swap,
/// retrying on conflicting writes.
pub async fn update_catalog<T, E, F>(store: &dyn Store, apply: F) -> Result<T, E>
where
    F: FnMut(&mut Catalog) -> Result<T, E> + Send,
    T: Send,
    E: From<StorageError>,
{
    update_document(store, apply).await
}

/// Directory counterpart of [`update_catalog`].
pub async fn update_directory<T, E, F>(store: &dyn Store, apply: F) -> Result<T, E>
where
    F: FnMut(&mut Directory) -> Result<T, E> + Send,
    T: Send,
    E: From<StorageError>,
{
    update_document(store, apply).await
}
