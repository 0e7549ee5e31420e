//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Pathway S3 bucket.

use uuid::Uuid;

use crate::models::{QuestionId, UserId};

pub const CATALOG: &str = "_state/catalog.json";

pub const DIRECTORY: &str = "_state/directory.json";

pub fn responses_prefix(question_id: QuestionId, user_id: UserId) -> String {
    format!("responses/{question_id}/{user_id}/")
}

pub fn response(question_id: QuestionId, user_id: UserId, id: Uuid) -> String {
    format!("responses/{question_id}/{user_id}/{id}.json")
}
