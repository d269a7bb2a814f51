//! services/api/src/web/protocol.rs
//!
//! Defines the wire shapes shared across the REST endpoints: the error
//! envelope every non-2xx response carries, and the field-level messages a
//! validation failure reports.

use serde::Serialize;

//=========================================================================================
// Error Envelope
//=========================================================================================

/// One failed field check, reported back to the client verbatim.
#[derive(Debug, Serialize)]
pub struct FieldError {
    /// The offending field, in request-payload spelling (e.g. `videoTitle`,
    /// `highlights[0]`, `lines[1].timestamp`).
    pub field: String,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: &'static str) -> Self {
        Self {
            field: field.into(),
            message,
        }
    }
}

/// The JSON body carried by error responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Populated only on validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    /// A plain error with no field detail.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }

    /// The envelope for one or more failed field checks.
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            error: "Validation failed".to_string(),
            fields,
        }
    }
}
