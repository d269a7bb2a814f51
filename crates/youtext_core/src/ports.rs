//! crates/youtext_core/src/ports.rs
//!
//! Defines the capability contracts (traits) for the application's stores.
//! These traits form the boundary of the hexagonal architecture: the layers
//! above stay independent of how records are actually kept, so the in-memory
//! maps can be swapped for a durable backend without changing any contract.

use async_trait::async_trait;

use crate::domain::{TranscriptionRecord, UserProfile};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Lookups report absence through `Option`, not through this error: absence
/// is a domain answer. The error channel exists for backend faults — the
/// in-memory adapters never produce one, a durable replacement would.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected store error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Ports (Traits)
//=========================================================================================

/// User profiles keyed by their generated id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a profile by id.
    async fn get_by_id(&self, user_id: &str) -> PortResult<Option<UserProfile>>;

    /// Looks up a profile by case-insensitive email match.
    async fn get_by_email(&self, email: &str) -> PortResult<Option<UserProfile>>;

    /// Inserts or replaces the entry stored under `profile.id` and returns
    /// the persisted value.
    async fn upsert(&self, profile: UserProfile) -> PortResult<UserProfile>;
}

/// Per-user collections of transcription records, most recent first.
#[async_trait]
pub trait TranscriptionStore: Send + Sync {
    /// Inserts `record` at the front of `user_id`'s collection, replacing any
    /// existing record with the same id. The record's owner is forced to
    /// `user_id` before it is stored; the persisted value is returned.
    async fn upsert(
        &self,
        user_id: &str,
        record: TranscriptionRecord,
    ) -> PortResult<TranscriptionRecord>;

    /// Returns the user's records in most-recent-first order, or an empty
    /// vector for a user with none.
    async fn list_by_user(&self, user_id: &str) -> PortResult<Vec<TranscriptionRecord>>;

    /// Finds one record by id within the user's collection.
    async fn get_by_user_and_id(
        &self,
        user_id: &str,
        id: &str,
    ) -> PortResult<Option<TranscriptionRecord>>;

    /// Removes the matching record if present. Idempotent: deleting an
    /// absent id is not an error.
    async fn delete(&self, user_id: &str, id: &str) -> PortResult<()>;
}
