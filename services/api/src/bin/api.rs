//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{InMemoryTranscriptionStore, InMemoryUserStore},
    auth::AuthService,
    config::{Config, ConfigError},
    error::ApiError,
    web::{api_router, middleware::USER_ID_HEADER, state::AppState, ApiDoc},
};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the In-Memory Stores & the Auth Service ---
    // Everything lives in process memory; a restart starts from a blank slate.
    let user_store = Arc::new(InMemoryUserStore::new());
    let transcription_store = Arc::new(InMemoryTranscriptionStore::new());
    let auth_service = Arc::new(AuthService::new(user_store));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        auth: auth_service,
        transcriptions: transcription_store,
        config: config.clone(),
    });

    // --- 4. Configure CORS for the Web Frontend ---
    let frontend_origin = config.frontend_origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("FRONTEND_ORIGIN".to_string(), e.to_string())
    })?;
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static(USER_ID_HEADER)]);

    // --- 5. Create the Web Router ---
    let app = api_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
