use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use pathway_auth::AuthContext;
use pathway_core::models::UserId;
use pathway_core::models::user::{Role, User};
use pathway_storage::update_directory;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    doctor_id: UserId,
    patient_id: UserId,
}

/// The calling doctor's patients.
pub async fn patients(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<User>>, ApiError> {
    let doctor_id = auth.require(&[Role::Doctor])?.id;
    let directory = state.store.load_directory().await?.value;
    Ok(Json(directory.patients_of(doctor_id)))
}

/// The calling patient's doctors.
pub async fn doctors(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<User>>, ApiError> {
    let patient_id = auth.require(&[Role::Patient])?.id;
    let directory = state.store.load_directory().await?.value;
    Ok(Json(directory.doctors_of(patient_id)))
}

pub async fn assign_patient_to_doctor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<AssignmentInput>,
) -> Result<Json<bool>, ApiError> {
    auth.require(&[Role::Admin, Role::Doctor])?;
    let created = update_directory(state.store.as_ref(), |directory| {
        directory
            .assign(input.doctor_id, input.patient_id)
            .map_err(ApiError::from)
    })
    .await?;

    tracing::info!(
        doctor_id = input.doctor_id,
        patient_id = input.patient_id,
        created,
        "patient assigned"
    );
    Ok(Json(created))
}

pub async fn unassign_patient_from_doctor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<AssignmentInput>,
) -> Result<Json<bool>, ApiError> {
    auth.require(&[Role::Admin, Role::Doctor])?;
    let removed = update_directory(state.store.as_ref(), |directory| {
        Ok::<_, ApiError>(directory.unassign(input.doctor_id, input.patient_id))
    })
    .await?;

    tracing::info!(
        doctor_id = input.doctor_id,
        patient_id = input.patient_id,
        removed,
        "patient unassigned"
    );
    Ok(Json(removed))
}
