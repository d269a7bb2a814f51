pub mod auth;
pub mod middleware;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod transcriptions;

// Re-export the router factory and middleware to make them easily accessible
// to the binary that will build the web server.
pub use middleware::require_user;
pub use routes::api_router;

use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::google_sign_in_handler,
        auth::sign_out_handler,
        auth::current_user_handler,
        transcriptions::list_transcriptions_handler,
        transcriptions::create_transcription_handler,
        transcriptions::get_transcription_handler,
        transcriptions::delete_transcription_handler,
    ),
    components(
        schemas(
            auth::GoogleAuthRequest,
            auth::AuthResponse,
            transcriptions::CreateTranscriptionRequest,
            transcriptions::TranscriptLineDto,
            transcriptions::TranscriptionRecordDto,
        )
    ),
    tags(
        (name = "auth", description = "Demo Google sign-in and session lookup."),
        (name = "transcriptions", description = "Per-user saved video transcriptions.")
    )
)]
pub struct ApiDoc;
