use async_trait::async_trait;
use aws_sdk_s3::Client;

use pathway_core::catalog::Catalog;
use pathway_core::directory::Directory;
use pathway_core::models::response::ResponseRecord;
use pathway_core::models::{QuestionId, UserId};
use pathway_core::s3_keys;

use crate::error::StorageError;
use crate::objects;
use crate::state::{load_state, save_state_if_match};
use crate::store::{Store, Versioned};

/// Store backed by one S3 bucket.
///
/// The catalog and directory are single JSON state files written with
/// `If-Match` / `If-None-Match`. Responses are one object each.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl Store for S3Store {
    async fn load_catalog(&self) -> Result<Versioned<Catalog>, StorageError> {
        load_state(&self.client, &self.bucket, s3_keys::CATALOG).await
    }

    async fn save_catalog(
        &self,
        catalog: &Catalog,
        etag: Option<&str>,
    ) -> Result<String, StorageError> {
        save_state_if_match(&self.client, &self.bucket, s3_keys::CATALOG, catalog, etag).await
    }

    async fn load_directory(&self) -> Result<Versioned<Directory>, StorageError> {
        load_state(&self.client, &self.bucket, s3_keys::DIRECTORY).await
    }

    async fn save_directory(
        &self,
        directory: &Directory,
        etag: Option<&str>,
    ) -> Result<String, StorageError> {
        save_state_if_match(&self.client, &self.bucket, s3_keys::DIRECTORY, directory, etag).await
    }

    async fn append_response(&self, record: &ResponseRecord) -> Result<(), StorageError> {
        let key = s3_keys::response(record.question_id, record.user_id, record.id);
        let body = serde_json::to_vec(record)?;
        objects::put_object(&self.client, &self.bucket, &key, body, Some("application/json"))
            .await?;
        Ok(())
    }

    async fn list_responses(
        &self,
        question_id: QuestionId,
        user_id: UserId,
    ) -> Result<Vec<ResponseRecord>, StorageError> {
        let prefix = s3_keys::responses_prefix(question_id, user_id);
        let keys = objects::list_objects(&self.client, &self.bucket, &prefix).await?;

        let mut records = Vec::with_capacity(keys.len());
        for key in &keys {
            let output = objects::get_object(&self.client, &self.bucket, key).await?;
            let record: ResponseRecord = serde_json::from_slice(&output.body)?;
            records.push(record);
        }
        records.sort_by_key(|r| r.submitted_at);
        Ok(records)
    }
}
