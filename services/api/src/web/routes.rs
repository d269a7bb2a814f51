//! services/api/src/web/routes.rs
//!
//! Assembles the HTTP router: public auth routes, identity-guarded
//! transcription routes, and the health probe. The binary and the integration
//! tests both build the application through this one function.

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::web::{auth, middleware::require_user, state::AppState, transcriptions};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Create the HTTP router with all routes
pub fn api_router(state: Arc<AppState>) -> Router {
    // Public routes (no resolved identity required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/google", post(auth::google_sign_in_handler))
        .route("/api/auth/sign-out", post(auth::sign_out_handler))
        .route("/api/auth/me", get(auth::current_user_handler));

    // Protected routes (identity resolution runs before any handler)
    let protected_routes = Router::new()
        .route(
            "/api/transcriptions",
            get(transcriptions::list_transcriptions_handler)
                .post(transcriptions::create_transcription_handler),
        )
        .route(
            "/api/transcriptions/{id}",
            get(transcriptions::get_transcription_handler)
                .delete(transcriptions::delete_transcription_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_user,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
