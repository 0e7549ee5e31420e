use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use pathway_auth::AuthContext;
use pathway_core::models::question::QuestionType;
use pathway_core::models::response::{AcceptedResponse, ResponseRecord, ResponseValue};
use pathway_core::models::QuestionId;
use pathway_engine::Step;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanSubmission {
    question_id: QuestionId,
    value: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSubmission {
    question_id: QuestionId,
    value: String,
}

/// A single option value, or a list of them for multiple choice.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSubmission {
    question_id: QuestionId,
    value: ChoiceValue,
}

/// The accepted response and the successors it routes to, in relation
/// order. An empty `next` means no relation matched.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    question_id: QuestionId,
    response: AcceptedResponse,
    next: Vec<QuestionId>,
}

/// A submission endpoint: its name and the question types it answers.
type Channel = (&'static str, &'static [QuestionType]);

const BOOLEAN_CHANNEL: Channel = ("boolean", &[QuestionType::Boolean]);
const TEXT_CHANNEL: Channel = ("text", &[QuestionType::Text]);
const CHOICE_CHANNEL: Channel = (
    "choice",
    &[QuestionType::SingleChoice, QuestionType::MultipleChoice],
);

pub async fn submit_boolean_question_response(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<BooleanSubmission>,
) -> Result<Json<Submission>, ApiError> {
    let raw = ResponseValue::Boolean(input.value);
    submit(&state, &auth, input.question_id, raw, BOOLEAN_CHANNEL).await
}

pub async fn submit_text_question_response(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<TextSubmission>,
) -> Result<Json<Submission>, ApiError> {
    let raw = ResponseValue::Text(input.value);
    submit(&state, &auth, input.question_id, raw, TEXT_CHANNEL).await
}

pub async fn submit_choice_question_response(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<ChoiceSubmission>,
) -> Result<Json<Submission>, ApiError> {
    let raw = match input.value {
        ChoiceValue::One(value) => ResponseValue::Text(value),
        ChoiceValue::Many(values) => ResponseValue::Choices(values),
    };
    submit(&state, &auth, input.question_id, raw, CHOICE_CHANNEL).await
}

/// Guard, check the question type against the channel, validate, route,
/// then persist the accepted response.
async fn submit(
    state: &AppState,
    auth: &AuthContext,
    question_id: QuestionId,
    raw: ResponseValue,
    (channel, accepted): Channel,
) -> Result<Json<Submission>, ApiError> {
    let user_id = auth.require(&[])?.id;

    let catalog = state.store.load_catalog().await?.value;
    let question = catalog
        .question(question_id)
        .ok_or_else(|| ApiError::NotFound(format!("question not found: {question_id}")))?;

    let Step { response, next } = pathway_engine::respond_as(question, &raw, accepted, channel)?;

    let record = ResponseRecord::new(user_id, question_id, response.clone());
    state.store.append_response(&record).await?;

    tracing::info!(user_id, question_id, next = ?next, "response accepted");
    Ok(Json(Submission {
        question_id,
        response,
        next,
    }))
}
