use pathway_core::models::user::{Role, User};

use crate::error::AuthError;

/// Require an authenticated caller holding one of `allowed`.
///
/// An empty `allowed` list only requires authentication. An absent caller
/// never passes. Returns the caller so handlers can use it directly.
pub fn enforce<'a>(caller: Option<&'a User>, allowed: &[Role]) -> Result<&'a User, AuthError> {
    match caller {
        Some(user) if allowed.is_empty() || allowed.contains(&user.role) => Ok(user),
        _ => Err(AuthError::Forbidden),
    }
}
