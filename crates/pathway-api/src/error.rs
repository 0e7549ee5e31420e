use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use pathway_auth::error::AuthError;
use pathway_core::error::CoreError;
use pathway_engine::error::{BatchError, EngineError, RelationError, ResponseError};
use pathway_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    /// The request was well-formed but its content was refused.
    Rejected { kind: &'static str, message: String },
    InvalidRelationBatch { index: usize, message: String },
    /// Stored relations disagree with the responses they route. Authoring bug.
    RelationTypeMismatch(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message, index) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            ApiError::Rejected { kind, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, kind, message, None)
            }
            ApiError::InvalidRelationBatch { index, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_RELATION_BATCH",
                message,
                Some(index),
            ),
            ApiError::RelationTypeMismatch(msg) => {
                tracing::error!("relation type mismatch: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RELATION_TYPE_MISMATCH",
                    msg,
                    None,
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                kind,
                index,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Forbidden => ApiError::Forbidden(e.to_string()),
            AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::Directory(inner) => inner.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::QuestionnaireNotFound(_)
            | CoreError::QuestionNotFound(_)
            | CoreError::UserNotFound(_) => ApiError::NotFound(e.to_string()),
            CoreError::DuplicateEmail(_) => ApiError::Conflict(e.to_string()),
            CoreError::TypeMismatch { .. }
            | CoreError::MissingOptions { .. }
            | CoreError::EmptyOptions
            | CoreError::DuplicateOptionValue(_)
            | CoreError::RelationSourceMismatch { .. } => ApiError::Rejected {
                kind: "INVALID_QUESTION",
                message: e.to_string(),
            },
            CoreError::UnexpectedRole { .. } => ApiError::Rejected {
                kind: "INVALID_ASSIGNMENT",
                message: e.to_string(),
            },
        }
    }
}

impl From<ResponseError> for ApiError {
    fn from(e: ResponseError) -> Self {
        let kind = match e {
            ResponseError::InvalidResponseType { .. }
            | ResponseError::QuestionTypeNotAccepted { .. } => "INVALID_RESPONSE_TYPE",
            ResponseError::UnknownOption { .. } => "UNKNOWN_OPTION",
        };
        ApiError::Rejected {
            kind,
            message: e.to_string(),
        }
    }
}

impl From<RelationError> for ApiError {
    fn from(e: RelationError) -> Self {
        ApiError::RelationTypeMismatch(e.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Response(inner) => inner.into(),
            EngineError::Relation(inner) => inner.into(),
        }
    }
}

impl From<BatchError> for ApiError {
    fn from(e: BatchError) -> Self {
        ApiError::InvalidRelationBatch {
            index: e.index,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
