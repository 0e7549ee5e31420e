use thiserror::Error;

use crate::models::question::QuestionType;
use crate::models::user::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{question_type} questions do not carry options")]
    TypeMismatch { question_type: QuestionType },

    #[error("{question_type} questions require a non-empty option list")]
    MissingOptions { question_type: QuestionType },

    #[error("option list must not be empty")]
    EmptyOptions,

    #[error("duplicate option value: {0}")]
    DuplicateOptionValue(String),

    #[error("questionnaire not found: {0}")]
    QuestionnaireNotFound(i64),

    #[error("question not found: {0}")]
    QuestionNotFound(i64),

    #[error("relation from question {relation_source} cannot be attached to question {question_id}")]
    RelationSourceMismatch {
        question_id: i64,
        relation_source: i64,
    },

    #[error("user not found: {0}")]
    UserNotFound(i64),

    #[error("a user with the email {0} already exists")]
    DuplicateEmail(String),

    #[error("user {user_id} is a {actual}, expected a {expected}")]
    UnexpectedRole {
        user_id: i64,
        expected: Role,
        actual: Role,
    },
}
