use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use pathway_auth::AuthContext;
use pathway_core::models::relation::{QuestionRelation, RelationInput};
use pathway_core::models::user::Role;
use pathway_engine::validate_relation_batch;
use pathway_storage::update_catalog;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateRelations {
    relations: Vec<RelationInput>,
}

/// Validate a whole relation batch against the current catalog and commit
/// it in one catalog write. One bad entry rejects the batch.
pub async fn create_question_relations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<CreateRelations>,
) -> Result<Json<Vec<QuestionRelation>>, ApiError> {
    auth.require(&[Role::Admin, Role::Doctor])?;

    let relations = update_catalog(state.store.as_ref(), |catalog| {
        let relations = validate_relation_batch(&*catalog, &input.relations)?;
        catalog.attach_relations(relations.clone())?;
        Ok::<_, ApiError>(relations)
    })
    .await?;

    tracing::info!(count = relations.len(), "question relations created");
    Ok(Json(relations))
}
