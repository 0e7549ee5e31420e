use pathway_core::models::user::{Role, User};

use crate::error::AuthError;
use crate::guard::enforce;

/// An authenticated caller and the token they presented.
#[derive(Clone, Debug)]
pub struct Caller {
    pub user: User,
    pub token: String,
}

/// Identity of the current request. Anonymous requests carry no caller.
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    caller: Option<Caller>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            caller: Some(Caller {
                user,
                token: token.into(),
            }),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.caller.as_ref().map(|c| &c.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.caller.as_ref().map(|c| c.token.as_str())
    }

    pub fn require(&self, allowed: &[Role]) -> Result<&User, AuthError> {
        enforce(self.user(), allowed)
    }

    /// The caller, or `Unauthenticated` for identity queries such as `me`.
    pub fn current(&self) -> Result<&User, AuthError> {
        self.user().ok_or(AuthError::Unauthenticated)
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts both `Bearer <token>` and the bare token.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then_some(token)
}
