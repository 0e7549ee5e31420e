use thiserror::Error;

use pathway_core::models::QuestionId;
use pathway_core::models::question::QuestionType;
use pathway_core::models::relation::PredicateKind;

/// A submitted value does not fit its question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("{question_type} question {question_id} expects a {expected}, got a {actual}")]
    InvalidResponseType {
        question_id: QuestionId,
        question_type: QuestionType,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{value}' is not an option of question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        value: String,
    },

    #[error("question {question_id} is {question_type} and cannot be answered as {answered_as}")]
    QuestionTypeNotAccepted {
        question_id: QuestionId,
        question_type: QuestionType,
        answered_as: &'static str,
    },
}

/// A relation's predicate kind cannot be evaluated against the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    #[error(
        "{kind} relation {question_id} -> {next_question_id} cannot be evaluated against a {response_type} response"
    )]
    RelationTypeMismatch {
        question_id: QuestionId,
        next_question_id: QuestionId,
        kind: PredicateKind,
        response_type: QuestionType,
    },
}

/// Why a single entry of a relation batch was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchRejection {
    #[error("neither includes nor equals is set")]
    MissingPredicate,

    #[error("both includes and equals are set")]
    ConflictingPredicates,

    #[error("source question {0} does not exist")]
    UnknownSource(QuestionId),

    #[error("target question {0} does not exist")]
    UnknownTarget(QuestionId),

    #[error("{kind} is not valid on a {question_type} question")]
    IncompatiblePredicate {
        kind: PredicateKind,
        question_type: QuestionType,
    },

    #[error("'{value}' is not an option of question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        value: String,
    },

    #[error("BOOLEAN relations compare against \"true\" or \"false\", got '{0}'")]
    NotABooleanLiteral(String),
}

/// A relation batch was refused as a whole. `index` is the first
/// offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid relation batch: entry {index}: {reason}")]
pub struct BatchError {
    pub index: usize,
    pub reason: BatchRejection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Relation(#[from] RelationError),
}
