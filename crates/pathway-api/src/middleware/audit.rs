use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use pathway_auth::AuthContext;

/// Audit logging middleware.
///
/// Logs every API request as a structured audit event using `tracing`,
/// tagged with the caller's user id when the request is authenticated.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let user_id = req
        .extensions()
        .get::<AuthContext>()
        .and_then(|ctx| ctx.user())
        .map(|u| u.id);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        user_id = ?user_id,
        "api_request"
    );

    response
}
