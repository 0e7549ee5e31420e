use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects;
use crate::store::Versioned;

/// Load a JSON state file from S3 together with its ETag.
///
/// A missing file loads as `T::default()` with no ETag.
pub async fn load_state<T: DeserializeOwned + Default>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Versioned<T>, StorageError> {
    match objects::get_object(client, bucket, key).await {
        Ok(output) => Ok(Versioned {
            value: serde_json::from_slice(&output.body)?,
            etag: Some(output.etag.unwrap_or_default()),
        }),
        Err(StorageError::NotFound { .. }) => Ok(Versioned {
            value: T::default(),
            etag: None,
        }),
        Err(e) => Err(e),
    }
}

/// Save a JSON state file to S3 if it is still at `expected_etag`.
///
/// `None` means the caller loaded a missing file; the write then only
/// succeeds if the file still does not exist. Returns the new ETag.
pub async fn save_state_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: Option<&str>,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    match expected_etag {
        Some(etag) => {
            objects::put_object_if_match(
                client,
                bucket,
                key,
                body,
                Some("application/json"),
                etag,
            )
            .await
        }
        None => {
            objects::put_object_if_absent(client, bucket, key, body, Some("application/json"))
                .await
        }
    }
}
