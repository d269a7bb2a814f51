//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: demo Google sign-in, sign-out, and the
//! current-user lookup.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::error;
use utoipa::ToSchema;

use crate::web::protocol::{ErrorResponse, FieldError};
use crate::web::state::AppState;
use youtext_core::domain::UserProfile;

/// Client-facing token lifetime (12 hours). Tokens never actually expire
/// server-side in this demo; the value only feeds the response payload.
const TOKEN_TTL_SECONDS: u64 = 12 * 60 * 60;

/// Permissive email shape: something before and after a single `@`, no
/// whitespace anywhere.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email pattern"));

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// The sign-in payload produced by the frontend's Google button.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleAuthRequest {
    pub credential: String,
    pub email: String,
    pub display_name: String,
}

impl GoogleAuthRequest {
    /// Runs the field checks. A field missing from the JSON deserializes to an
    /// empty string and fails the same blank check a whitespace value does.
    fn validate(&self) -> Vec<FieldError> {
        let mut fields = Vec::new();
        if self.credential.trim().is_empty() {
            fields.push(FieldError::new("credential", "Client token is required"));
        }
        if self.email.trim().is_empty() {
            fields.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL_RE.is_match(&self.email) {
            fields.push(FieldError::new("email", "Invalid email"));
        }
        if self.display_name.trim().is_empty() {
            fields.push(FieldError::new("displayName", "Display name is required"));
        }
        fields
    }
}

/// The response payload for both sign-in and the current-user lookup.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub access_token: String,
    pub expires_in_seconds: u64,
}

impl AuthResponse {
    fn new(profile: &UserProfile, token: String) -> Self {
        Self {
            user_id: profile.id.clone(),
            display_name: profile.display_name.clone(),
            email: profile.email.clone(),
            access_token: token,
            expires_in_seconds: TOKEN_TTL_SECONDS,
        }
    }
}

/// The query parameter shared by sign-out and the current-user lookup.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/google - Sign in with a Google credential (demo stub)
#[utoipa::path(
    post,
    path = "/api/auth/google",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "Signed in; the payload carries the active token", body = AuthResponse),
        (status = 400, description = "One or more fields failed validation"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn google_sign_in_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoogleAuthRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    // 1. Check the payload before touching any store.
    let failures = req.validate();
    if !failures.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(failures)),
        ));
    }

    // 2. Upsert the profile and mint the active token.
    let profile = state
        .auth
        .sign_in_with_google(&req.credential, &req.email, &req.display_name)
        .await
        .map_err(|e| {
            error!("Failed to sign user in: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to sign in")),
            )
        })?;

    // 3. Read the token straight back; its absence right after minting means
    //    the sign-in flow itself is broken.
    let token = state.auth.get_active_token(&profile.id).await.ok_or_else(|| {
        error!("No active token for user {} right after sign-in", profile.id);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Token creation failed")),
        )
    })?;

    // 4. Return the signed-in profile with its token.
    Ok(Json(AuthResponse::new(&profile, token)))
}

/// POST /api/auth/sign-out - Revoke the user's active token
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    params(
        ("userId" = String, Query, description = "The user to sign out.")
    ),
    responses(
        (status = 204, description = "Signed out; also returned for unknown users")
    ),
    tag = "auth"
)]
pub async fn sign_out_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserIdQuery>,
) -> StatusCode {
    state.auth.sign_out(&query.user_id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me - Look up a signed-in user and their active token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    params(
        ("userId" = String, Query, description = "The user to look up.")
    ),
    responses(
        (status = 200, description = "The user has an active session", body = AuthResponse),
        (status = 404, description = "Unknown user, or no active token")
    ),
    tag = "auth"
)]
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    // 1. The user has to exist...
    let profile = state
        .auth
        .find_by_id(&query.user_id)
        .await
        .map_err(|e| {
            error!("Failed to look user up: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to look user up")),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ))?;

    // 2. ...and hold an active token; a signed-out user reads as absent.
    let token = state.auth.get_active_token(&profile.id).await.ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("User not found")),
    ))?;

    Ok(Json(AuthResponse::new(&profile, token)))
}
