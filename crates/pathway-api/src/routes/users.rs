use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use pathway_auth::flows;
use pathway_auth::AuthContext;
use pathway_core::models::user::{Role, User, UserUpdate};
use pathway_core::models::UserId;
use pathway_storage::update_directory;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUser {
    email: String,
    password: String,
    role: Role,
    name: String,
}

pub async fn me(Extension(auth): Extension<AuthContext>) -> Result<Json<User>, ApiError> {
    Ok(Json(auth.current()?.clone()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let user_id = auth.require(&[])?.id;
    let user = update_directory(state.store.as_ref(), |directory| {
        directory
            .update_user(user_id, update.clone())
            .map_err(ApiError::from)
    })
    .await?;
    Ok(Json(user))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let directory = state.store.load_directory().await?.value;
    Ok(Json(directory.users()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    let directory = state.store.load_directory().await?.value;
    let user = directory
        .user(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {id}")))?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUser>,
) -> Result<Json<User>, ApiError> {
    let user = update_directory(state.store.as_ref(), |directory| {
        flows::register(
            directory,
            &input.name,
            &input.email,
            &input.password,
            input.role,
        )
        .map_err(ApiError::from)
    })
    .await?;
    Ok(Json(user))
}
