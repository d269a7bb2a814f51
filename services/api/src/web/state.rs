//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::auth::AuthService;
use crate::config::Config;
use std::sync::Arc;
use youtext_core::ports::TranscriptionStore;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub transcriptions: Arc<dyn TranscriptionStore>,
    pub config: Arc<Config>,
}
