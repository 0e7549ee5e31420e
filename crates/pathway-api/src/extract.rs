use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` whose rejections (malformed body, missing required field) come
/// back in the same error shape as every other API error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
