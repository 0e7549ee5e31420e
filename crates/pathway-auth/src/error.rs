use pathway_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Insufficient permissions.")]
    Forbidden,

    #[error("No user is currently authenticated.")]
    Unauthenticated,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Directory(#[from] CoreError),
}
