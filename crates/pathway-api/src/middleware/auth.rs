use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use pathway_auth::context::bearer_token;
use pathway_auth::AuthContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Session resolution middleware.
///
/// Reads the `Authorization` header (`Bearer <token>` or the bare token) and
/// looks the token up in the user directory. Inserts an [`AuthContext`] into
/// request extensions for every request. A missing, unknown or expired token
/// yields an anonymous context and route guards decide what it may do.
pub async fn resolve_caller(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    let context = match token {
        Some(token) => {
            let directory = state.store.load_directory().await?.value;
            match directory.user_for_token(&token, jiff::Timestamp::now()) {
                Some(user) => AuthContext::authenticated(user.clone(), token),
                None => {
                    tracing::debug!("unknown or expired session token");
                    AuthContext::anonymous()
                }
            }
        }
        None => AuthContext::anonymous(),
    };

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
