use pathway_core::directory::Directory;
use pathway_core::models::user::{Role, User};
use tracing::info;

use crate::credentials::{hash_password, issue_token, verify_password};
use crate::error::AuthError;

/// Register a new user. Fails if the email is already taken.
pub fn register(
    directory: &mut Directory,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<User, AuthError> {
    let user = directory.create_user(
        name,
        email,
        role,
        hash_password(password),
        jiff::Timestamp::now(),
    )?;
    info!(user_id = user.id, role = %user.role, "user registered");
    Ok(user)
}

/// Check email/password and open a session. Returns the new bearer token.
pub fn authenticate(
    directory: &mut Directory,
    email: &str,
    password: &str,
) -> Result<(User, String), AuthError> {
    info!(email = email, "initiating auth");

    let user_id = match directory.find_by_email(email) {
        Some((user, credential)) if verify_password(credential, password) => user.id,
        _ => return Err(AuthError::InvalidCredentials),
    };

    let token = issue_token();
    directory.open_session(token.clone(), user_id, jiff::Timestamp::now())?;
    let user = directory
        .user(user_id)
        .cloned()
        .ok_or(AuthError::InvalidCredentials)?;
    Ok((user, token))
}

/// Close the session behind `token`. Returns whether one was open.
pub fn deauthenticate(directory: &mut Directory, token: &str) -> bool {
    let closed = directory.close_session(token);
    if closed {
        info!("session closed");
    }
    closed
}
