//! services/api/src/web/middleware.rs
//!
//! Identity-resolution middleware for protecting the transcription routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;

/// The request header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The resolved caller, inserted into request extensions for handlers to use.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Middleware that resolves the `X-User-Id` header to a known user profile.
///
/// A caller resolves only if the header is present, non-blank, and names an
/// existing user. Anything else is rejected with 401 before any transcription
/// store access, and the response does not say which check failed.
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract the user id header; a missing or blank value fails without
    //    touching any store.
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if user_id.trim().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    // 2. The id must map to an existing profile.
    let profile = state
        .auth
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to resolve user: {:?}", e);
            StatusCode::UNAUTHORIZED
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 3. Insert the resolved identity into request extensions.
    req.extensions_mut().insert(CurrentUser(profile.id));

    // 4. Continue to the handler.
    Ok(next.run(req).await)
}
