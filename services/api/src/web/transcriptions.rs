//! services/api/src/web/transcriptions.rs
//!
//! Contains the Axum handlers for the transcription REST endpoints, together
//! with the DTO shapes and their mapping to and from the domain record.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::middleware::CurrentUser;
use crate::web::protocol::{ErrorResponse, FieldError};
use crate::web::state::AppState;
use youtext_core::domain::{TranscriptLine, TranscriptionRecord};

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// One timed transcript line on the wire, shared by requests and responses.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct TranscriptLineDto {
    pub timestamp: String,
    pub text: String,
}

/// The creation payload. There is deliberately no `id` field; the server
/// always assigns one, so a create can never overwrite an existing record.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTranscriptionRequest {
    pub video_title: String,
    pub video_url: String,
    pub summary: String,
    pub highlights: Vec<String>,
    pub transcript: String,
    pub lines: Vec<TranscriptLineDto>,
}

impl CreateTranscriptionRequest {
    /// Runs the field checks. Missing JSON fields deserialize to their empty
    /// defaults and fail the same checks blank values do.
    fn validate(&self) -> Vec<FieldError> {
        let mut fields = Vec::new();
        if self.video_title.trim().is_empty() {
            fields.push(FieldError::new("videoTitle", "Video title is required"));
        }
        if self.video_url.trim().is_empty() {
            fields.push(FieldError::new("videoUrl", "Video URL is required"));
        }
        if self.summary.trim().is_empty() {
            fields.push(FieldError::new("summary", "Summary is required"));
        }
        if self.highlights.is_empty() {
            fields.push(FieldError::new("highlights", "Highlights must not be empty"));
        }
        for (index, highlight) in self.highlights.iter().enumerate() {
            if highlight.trim().is_empty() {
                fields.push(FieldError::new(
                    format!("highlights[{}]", index),
                    "Highlight must not be blank",
                ));
            }
        }
        if self.transcript.trim().is_empty() {
            fields.push(FieldError::new("transcript", "Transcript body is required"));
        }
        if self.lines.is_empty() {
            fields.push(FieldError::new("lines", "At least one line is required"));
        }
        for (index, line) in self.lines.iter().enumerate() {
            if line.timestamp.trim().is_empty() {
                fields.push(FieldError::new(
                    format!("lines[{}].timestamp", index),
                    "Timestamp is required",
                ));
            }
            if line.text.trim().is_empty() {
                fields.push(FieldError::new(
                    format!("lines[{}].text", index),
                    "Text must not be empty",
                ));
            }
        }
        fields
    }

    /// Builds the domain record owned by `user_id`. Highlights are stored
    /// trimmed; the record id and creation time are assigned here.
    fn into_record(self, user_id: &str) -> TranscriptionRecord {
        let highlights = self
            .highlights
            .into_iter()
            .map(|highlight| highlight.trim().to_owned())
            .collect();
        let lines = self
            .lines
            .into_iter()
            .map(|line| TranscriptLine {
                timestamp: line.timestamp,
                text: line.text,
            })
            .collect();
        TranscriptionRecord::new(
            user_id,
            self.video_title,
            self.video_url,
            self.summary,
            highlights,
            self.transcript,
            lines,
        )
    }
}

/// A stored transcription as returned to the client. The owner id is internal
/// and never serialized.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionRecordDto {
    pub id: String,
    pub video_title: String,
    pub video_url: String,
    pub summary: String,
    pub highlights: Vec<String>,
    pub transcript: String,
    pub lines: Vec<TranscriptLineDto>,
    pub created_at: DateTime<Utc>,
}

impl TranscriptionRecordDto {
    fn from_record(record: TranscriptionRecord) -> Self {
        Self {
            id: record.id,
            video_title: record.video_title,
            video_url: record.video_url,
            summary: record.summary,
            highlights: record.highlights,
            transcript: record.transcript,
            lines: record
                .lines
                .into_iter()
                .map(|line| TranscriptLineDto {
                    timestamp: line.timestamp,
                    text: line.text,
                })
                .collect(),
            created_at: record.created_at,
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// GET /api/transcriptions - List the caller's transcriptions, most recent first
#[utoipa::path(
    get,
    path = "/api/transcriptions",
    params(
        ("x-user-id" = String, Header, description = "The caller's user id.")
    ),
    responses(
        (status = 200, description = "The caller's records, most recent first", body = [TranscriptionRecordDto]),
        (status = 401, description = "Missing, blank, or unknown user id")
    ),
    tag = "transcriptions"
)]
pub async fn list_transcriptions_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<TranscriptionRecordDto>>, (StatusCode, Json<ErrorResponse>)> {
    let records = state
        .transcriptions
        .list_by_user(&user.0)
        .await
        .map_err(|e| {
            error!("Failed to list transcriptions: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to list transcriptions")),
            )
        })?;

    Ok(Json(
        records
            .into_iter()
            .map(TranscriptionRecordDto::from_record)
            .collect(),
    ))
}

/// POST /api/transcriptions - Save a new transcription for the caller
#[utoipa::path(
    post,
    path = "/api/transcriptions",
    request_body = CreateTranscriptionRequest,
    params(
        ("x-user-id" = String, Header, description = "The caller's user id.")
    ),
    responses(
        (status = 201, description = "Created; the Location header points at the new record", body = TranscriptionRecordDto),
        (status = 400, description = "One or more fields failed validation"),
        (status = 401, description = "Missing, blank, or unknown user id")
    ),
    tag = "transcriptions"
)]
pub async fn create_transcription_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTranscriptionRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    // 1. Check the payload.
    let failures = req.validate();
    if !failures.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(failures)),
        ));
    }

    // 2. Persist the record under the resolved caller.
    let saved = state
        .transcriptions
        .upsert(&user.0, req.into_record(&user.0))
        .await
        .map_err(|e| {
            error!("Failed to save transcription: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save transcription")),
            )
        })?;

    // 3. Point the caller at the new resource.
    let location = format!("/api/transcriptions/{}", saved.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TranscriptionRecordDto::from_record(saved)),
    ))
}

/// GET /api/transcriptions/{id} - Fetch one of the caller's transcriptions
#[utoipa::path(
    get,
    path = "/api/transcriptions/{id}",
    params(
        ("id" = String, Path, description = "The record id."),
        ("x-user-id" = String, Header, description = "The caller's user id.")
    ),
    responses(
        (status = 200, description = "The record", body = TranscriptionRecordDto),
        (status = 401, description = "Missing, blank, or unknown user id"),
        (status = 404, description = "No such record for this caller")
    ),
    tag = "transcriptions"
)]
pub async fn get_transcription_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptionRecordDto>, (StatusCode, Json<ErrorResponse>)> {
    let record = state
        .transcriptions
        .get_by_user_and_id(&user.0, &id)
        .await
        .map_err(|e| {
            error!("Failed to fetch transcription {}: {:?}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch transcription")),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Transcription not found")),
        ))?;

    Ok(Json(TranscriptionRecordDto::from_record(record)))
}

/// DELETE /api/transcriptions/{id} - Delete one of the caller's transcriptions
#[utoipa::path(
    delete,
    path = "/api/transcriptions/{id}",
    params(
        ("id" = String, Path, description = "The record id."),
        ("x-user-id" = String, Header, description = "The caller's user id.")
    ),
    responses(
        (status = 204, description = "Deleted; also returned when the id was already absent"),
        (status = 401, description = "Missing, blank, or unknown user id")
    ),
    tag = "transcriptions"
)]
pub async fn delete_transcription_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .transcriptions
        .delete(&user.0, &id)
        .await
        .map_err(|e| {
            error!("Failed to delete transcription {}: {:?}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete transcription")),
            )
        })?;

    Ok(StatusCode::NO_CONTENT)
}
