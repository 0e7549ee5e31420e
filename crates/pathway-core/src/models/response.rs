use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::QuestionType;
use super::{QuestionId, UserId};

/// A value exactly as submitted, before it is checked against a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Boolean(bool),
    Text(String),
    Choices(Vec<String>),
}

impl ResponseValue {
    /// Short shape name used in rejection messages.
    pub fn shape(&self) -> &'static str {
        match self {
            ResponseValue::Boolean(_) => "boolean",
            ResponseValue::Text(_) => "string",
            ResponseValue::Choices(_) => "list of strings",
        }
    }
}

impl From<bool> for ResponseValue {
    fn from(value: bool) -> Self {
        ResponseValue::Boolean(value)
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        ResponseValue::Text(value.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        ResponseValue::Text(value)
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(value: Vec<String>) -> Self {
        ResponseValue::Choices(value)
    }
}

/// A response that has been checked against its question's variant.
///
/// Choice responses hold option `value` tokens, never display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptedResponse {
    Text(String),
    MultipleChoice(BTreeSet<String>),
    SingleChoice(String),
    Boolean(bool),
}

impl AcceptedResponse {
    pub fn question_type(&self) -> QuestionType {
        match self {
            AcceptedResponse::Text(_) => QuestionType::Text,
            AcceptedResponse::MultipleChoice(_) => QuestionType::MultipleChoice,
            AcceptedResponse::SingleChoice(_) => QuestionType::SingleChoice,
            AcceptedResponse::Boolean(_) => QuestionType::Boolean,
        }
    }
}

/// One submission event. Submissions are never mutated; a later submission
/// for the same (user, question) pair is a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub response: AcceptedResponse,
    pub submitted_at: jiff::Timestamp,
}

impl ResponseRecord {
    pub fn new(user_id: UserId, question_id: QuestionId, response: AcceptedResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            question_id,
            response,
            submitted_at: jiff::Timestamp::now(),
        }
    }
}

/// The current answer out of a submission history: the most recent record.
pub fn latest(records: &[ResponseRecord]) -> Option<&ResponseRecord> {
    records.iter().max_by_key(|r| r.submitted_at)
}
