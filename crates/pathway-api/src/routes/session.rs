use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use pathway_auth::flows;
use pathway_auth::AuthContext;
use pathway_core::models::user::User;
use pathway_storage::update_directory;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct Session {
    token: String,
    user: User,
}

pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<Session>, ApiError> {
    let (user, token) = update_directory(state.store.as_ref(), |directory| {
        flows::authenticate(directory, &credentials.email, &credentials.password)
            .map_err(ApiError::from)
    })
    .await?;
    Ok(Json(Session { token, user }))
}

/// Close the caller's session. `false` when the request carried no session.
pub async fn deauthenticate(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<bool>, ApiError> {
    let Some(token) = auth.token() else {
        return Ok(Json(false));
    };
    let closed = update_directory(state.store.as_ref(), |directory| {
        Ok::<_, ApiError>(flows::deauthenticate(directory, token))
    })
    .await?;
    Ok(Json(closed))
}
