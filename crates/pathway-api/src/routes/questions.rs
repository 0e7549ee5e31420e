use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use pathway_auth::AuthContext;
use pathway_core::models::question::Question;
use pathway_core::models::questionnaire::NewQuestion;
use pathway_core::models::response::{latest, AcceptedResponse};
use pathway_core::models::user::Role;
use pathway_core::models::QuestionId;
use pathway_storage::update_catalog;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddQuestions {
    questions: Vec<NewQuestion>,
}

/// A question as seen by the caller, with their current answer if any.
#[derive(Serialize)]
pub struct QuestionView {
    #[serde(flatten)]
    question: Question,
    response: Option<AcceptedResponse>,
}

/// Attach the caller's latest response. Anonymous callers see none.
pub(crate) async fn view(
    state: &AppState,
    auth: &AuthContext,
    question: Question,
) -> Result<QuestionView, ApiError> {
    let response = match auth.user() {
        Some(user) => {
            let history = state.store.list_responses(question.id, user.id).await?;
            latest(&history).map(|r| r.response.clone())
        }
        None => None,
    };
    Ok(QuestionView { question, response })
}

pub async fn get_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<QuestionId>,
) -> Result<Json<QuestionView>, ApiError> {
    let catalog = state.store.load_catalog().await?.value;
    let question = catalog
        .question(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("question not found: {id}")))?;

    Ok(Json(view(&state, &auth, question).await?))
}

pub async fn add_questions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<AddQuestions>,
) -> Result<Json<Vec<Question>>, ApiError> {
    auth.require(&[Role::Admin, Role::Doctor])?;

    let questions = update_catalog(state.store.as_ref(), |catalog| {
        catalog
            .add_questions(input.questions.clone())
            .map_err(ApiError::from)
    })
    .await?;

    tracing::info!(count = questions.len(), "questions added");
    Ok(Json(questions))
}
