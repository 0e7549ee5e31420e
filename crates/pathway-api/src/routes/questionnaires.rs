use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;

use pathway_auth::AuthContext;
use pathway_core::models::questionnaire::{NewQuestionnaire, Questionnaire};
use pathway_core::models::user::Role;
use pathway_core::models::QuestionnaireId;
use pathway_storage::update_catalog;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::routes::questions::{QuestionView, view};
use crate::state::AppState;

/// A questionnaire as seen by the caller: every question carries the
/// caller's latest response.
#[derive(Serialize)]
pub struct QuestionnaireView {
    id: QuestionnaireId,
    title: String,
    questions: Vec<QuestionView>,
}

async fn view_questionnaire(
    state: &AppState,
    auth: &AuthContext,
    questionnaire: Questionnaire,
) -> Result<QuestionnaireView, ApiError> {
    let mut questions = Vec::with_capacity(questionnaire.questions.len());
    for question in questionnaire.questions {
        questions.push(view(state, auth, question).await?);
    }
    Ok(QuestionnaireView {
        id: questionnaire.id,
        title: questionnaire.title,
        questions,
    })
}

pub async fn list_questionnaires(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<QuestionnaireView>>, ApiError> {
    let catalog = state.store.load_catalog().await?.value;
    let mut views = Vec::new();
    for questionnaire in catalog.questionnaires() {
        views.push(view_questionnaire(&state, &auth, questionnaire).await?);
    }
    Ok(Json(views))
}

pub async fn get_questionnaire(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<QuestionnaireId>,
) -> Result<Json<QuestionnaireView>, ApiError> {
    let catalog = state.store.load_catalog().await?.value;
    let questionnaire = catalog
        .questionnaire(id)
        .ok_or_else(|| ApiError::NotFound(format!("questionnaire not found: {id}")))?;
    Ok(Json(view_questionnaire(&state, &auth, questionnaire).await?))
}

pub async fn create_questionnaire(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<NewQuestionnaire>,
) -> Result<Json<Questionnaire>, ApiError> {
    let author = auth.require(&[Role::Admin, Role::Doctor])?.id;

    let questionnaire = update_catalog(state.store.as_ref(), |catalog| {
        catalog
            .create_questionnaire(input.title.clone(), input.questions.clone())
            .map_err(ApiError::from)
    })
    .await?;

    tracing::info!(
        questionnaire_id = questionnaire.id,
        questions = questionnaire.questions.len(),
        author,
        "questionnaire created"
    );
    Ok(Json(questionnaire))
}
