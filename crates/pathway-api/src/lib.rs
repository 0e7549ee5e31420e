//! pathway-api
//!
//! HTTP boundary for the questionnaire platform. Every mutating route runs
//! the role guard first, then hands off to `pathway-engine` and persists
//! through a `pathway-storage` store.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Identity
        .route("/me", get(routes::users::me).put(routes::users::update_me))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/users/{id}", get(routes::users::get_user))
        .route("/authenticate", post(routes::session::authenticate))
        .route("/deauthenticate", post(routes::session::deauthenticate))
        // Care team
        .route("/patients", get(routes::assignments::patients))
        .route("/doctors", get(routes::assignments::doctors))
        .route(
            "/assignments",
            post(routes::assignments::assign_patient_to_doctor)
                .delete(routes::assignments::unassign_patient_from_doctor),
        )
        // Authoring
        .route(
            "/questionnaires",
            get(routes::questionnaires::list_questionnaires)
                .post(routes::questionnaires::create_questionnaire),
        )
        .route(
            "/questionnaires/{id}",
            get(routes::questionnaires::get_questionnaire),
        )
        .route("/questions", post(routes::questions::add_questions))
        .route("/questions/{id}", get(routes::questions::get_question))
        .route("/relations", post(routes::relations::create_question_relations))
        // Responses
        .route(
            "/responses/boolean",
            post(routes::responses::submit_boolean_question_response),
        )
        .route(
            "/responses/text",
            post(routes::responses::submit_text_question_response),
        )
        .route(
            "/responses/choice",
            post(routes::responses::submit_choice_question_response),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::resolve_caller,
        ))
        .layer(cors)
        .with_state(state)
}
