//! crates/youtext_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any HTTP framework or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A signed-in user's profile.
///
/// Profiles are immutable values: "updating" one means building a copy with
/// `with_display_name` and upserting it, which keeps `id` and `created_at`
/// stable for the lifetime of the account.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates the profile for a first sign-in: fresh id, creation time now.
    pub fn new(email: &str, display_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            display_name: display_name.to_owned(),
            created_at: Utc::now(),
        }
    }

    /// Copy with the display name replaced; `id`, `email` and `created_at`
    /// carry over unchanged.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_owned();
        self
    }
}

/// One timestamped utterance of a transcription's full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub timestamp: String,
    pub text: String,
}

/// A saved transcription, owned by exactly one user.
#[derive(Debug, Clone)]
pub struct TranscriptionRecord {
    pub id: String,
    pub user_id: String,
    pub video_title: String,
    pub video_url: String,
    pub summary: String,
    pub highlights: Vec<String>,
    pub transcript: String,
    pub lines: Vec<TranscriptLine>,
    pub created_at: DateTime<Utc>,
}

impl TranscriptionRecord {
    /// Creates a record with a fresh id and creation time now.
    pub fn new(
        user_id: &str,
        video_title: String,
        video_url: String,
        summary: String,
        highlights: Vec<String>,
        transcript: String,
        lines: Vec<TranscriptLine>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            video_title,
            video_url,
            summary,
            highlights,
            transcript,
            lines,
            created_at: Utc::now(),
        }
    }

    /// Copy with the owner replaced. The store uses this to force every
    /// persisted record under the resolved caller's id.
    pub fn with_owner(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_owned();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(user_id: &str) -> TranscriptionRecord {
        TranscriptionRecord::new(
            user_id,
            "T".to_string(),
            "u".to_string(),
            "s".to_string(),
            vec!["h1".to_string()],
            "tx".to_string(),
            vec![TranscriptLine {
                timestamp: "00:01".to_string(),
                text: "hi".to_string(),
            }],
        )
    }

    #[test]
    fn test_new_profile_generates_id_and_timestamp() {
        let a = UserProfile::new("a@x.com", "Ada");
        let b = UserProfile::new("a@x.com", "Ada");

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.email, "a@x.com");
        assert_eq!(a.display_name, "Ada");
    }

    #[test]
    fn test_with_display_name_preserves_identity() {
        let original = UserProfile::new("a@x.com", "Ada");
        let id = original.id.clone();
        let created_at = original.created_at;

        let renamed = original.with_display_name("Ada L.");

        assert_eq!(renamed.id, id);
        assert_eq!(renamed.created_at, created_at);
        assert_eq!(renamed.email, "a@x.com");
        assert_eq!(renamed.display_name, "Ada L.");
    }

    #[test]
    fn test_new_record_generates_distinct_ids() {
        let a = sample_record("user-1");
        let b = sample_record("user-1");

        assert_ne!(a.id, b.id);
        assert_eq!(a.user_id, "user-1");
    }

    #[test]
    fn test_with_owner_replaces_only_the_owner() {
        let record = sample_record("user-1");
        let id = record.id.clone();
        let created_at = record.created_at;

        let reowned = record.with_owner("user-2");

        assert_eq!(reowned.user_id, "user-2");
        assert_eq!(reowned.id, id);
        assert_eq!(reowned.created_at, created_at);
        assert_eq!(reowned.video_title, "T");
    }
}
