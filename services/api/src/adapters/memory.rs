//! services/api/src/adapters/memory.rs
//!
//! This module contains the in-memory store adapters, which are the concrete
//! implementations of the `UserStore` and `TranscriptionStore` ports from the
//! `core` crate. All state lives in process-wide maps guarded by `RwLock`;
//! nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use youtext_core::domain::{TranscriptionRecord, UserProfile};
use youtext_core::ports::{PortResult, TranscriptionStore, UserStore};

//=========================================================================================
// User Store
//=========================================================================================

/// An in-memory `UserStore`: profiles keyed by user id.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_id(&self, user_id: &str) -> PortResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> PortResult<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|profile| profile.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> PortResult<UserProfile> {
        self.users
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}

//=========================================================================================
// Transcription Store
//=========================================================================================

/// An in-memory `TranscriptionStore`: per-user record lists, most recent first.
///
/// One lock guards the whole map, so a user's list is created at most once and
/// mutations of any list are mutually exclusive.
#[derive(Default)]
pub struct InMemoryTranscriptionStore {
    records: RwLock<HashMap<String, Vec<TranscriptionRecord>>>,
}

impl InMemoryTranscriptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptionStore for InMemoryTranscriptionStore {
    async fn upsert(
        &self,
        user_id: &str,
        record: TranscriptionRecord,
    ) -> PortResult<TranscriptionRecord> {
        let mut records = self.records.write().await;
        let list = records.entry(user_id.to_owned()).or_default();

        // Replace-by-id: an incoming record evicts any stored one with the
        // same id before taking the front slot.
        list.retain(|existing| existing.id != record.id);

        let persisted = record.with_owner(user_id);
        list.insert(0, persisted.clone());
        Ok(persisted)
    }

    async fn list_by_user(&self, user_id: &str) -> PortResult<Vec<TranscriptionRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_by_user_and_id(
        &self,
        user_id: &str,
        id: &str,
    ) -> PortResult<Option<TranscriptionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(user_id)
            .and_then(|list| list.iter().find(|record| record.id == id))
            .cloned())
    }

    async fn delete(&self, user_id: &str, id: &str) -> PortResult<()> {
        let mut records = self.records.write().await;
        if let Some(list) = records.get_mut(user_id) {
            list.retain(|record| record.id != id);
            // An emptied list gives its map entry back rather than lingering.
            if list.is_empty() {
                records.remove(user_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use youtext_core::domain::TranscriptLine;

    fn record_with_id(user_id: &str, id: &str, title: &str) -> TranscriptionRecord {
        TranscriptionRecord {
            id: id.to_owned(),
            user_id: user_id.to_owned(),
            video_title: title.to_owned(),
            video_url: "https://youtu.be/v".to_owned(),
            summary: "s".to_owned(),
            highlights: vec!["h1".to_owned()],
            transcript: "tx".to_owned(),
            lines: vec![TranscriptLine {
                timestamp: "00:01".to_owned(),
                text: "hi".to_owned(),
            }],
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_user_store_round_trip_by_id() {
        let store = InMemoryUserStore::new();
        let profile = UserProfile::new("a@x.com", "Ada");
        let saved = store.upsert(profile.clone()).await.unwrap();

        assert_eq!(saved.id, profile.id);
        let found = store.get_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert!(store.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_lookup_by_email_ignores_case() {
        let store = InMemoryUserStore::new();
        store.upsert(UserProfile::new("a@x.com", "Ada")).await.unwrap();

        let found = store.get_by_email("A@X.Com").await.unwrap();
        assert!(found.is_some());
        assert!(store.get_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_upsert_replaces_same_id() {
        let store = InMemoryUserStore::new();
        let profile = store.upsert(UserProfile::new("a@x.com", "Ada")).await.unwrap();
        store
            .upsert(profile.with_display_name("Ada L."))
            .await
            .unwrap();

        let users = store.users.read().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users.values().next().unwrap().display_name, "Ada L.");
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let store = InMemoryTranscriptionStore::new();
        for title in ["first", "second", "third"] {
            let record = record_with_id("alice", &format!("id-{}", title), title);
            store.upsert("alice", record).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_by_user("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.video_title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_upsert_same_id_replaces_without_duplicating() {
        let store = InMemoryTranscriptionStore::new();
        store
            .upsert("alice", record_with_id("alice", "id-1", "old title"))
            .await
            .unwrap();
        store
            .upsert("alice", record_with_id("alice", "id-2", "other"))
            .await
            .unwrap();
        store
            .upsert("alice", record_with_id("alice", "id-1", "new title"))
            .await
            .unwrap();

        let list = store.list_by_user("alice").await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "id-1");
        assert_eq!(list[0].video_title, "new title");
    }

    #[tokio::test]
    async fn test_upsert_forces_the_owner() {
        let store = InMemoryTranscriptionStore::new();
        let saved = store
            .upsert("alice", record_with_id("mallory", "id-1", "t"))
            .await
            .unwrap();

        assert_eq!(saved.user_id, "alice");
        assert!(store
            .get_by_user_and_id("alice", "id-1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_by_user_and_id("mallory", "id-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_by_user_and_id_scopes_to_the_user() {
        let store = InMemoryTranscriptionStore::new();
        store
            .upsert("alice", record_with_id("alice", "id-1", "t"))
            .await
            .unwrap();

        assert!(store
            .get_by_user_and_id("alice", "id-1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_by_user_and_id("bob", "id-1")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .get_by_user_and_id("alice", "id-2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_drops_empty_entries() {
        let store = InMemoryTranscriptionStore::new();
        store
            .upsert("alice", record_with_id("alice", "id-1", "t"))
            .await
            .unwrap();

        store.delete("alice", "id-1").await.unwrap();
        assert!(store.list_by_user("alice").await.unwrap().is_empty());
        // The per-user entry itself is gone, not just emptied.
        assert!(!store.records.read().await.contains_key("alice"));

        // Deleting again, or for a user that never saved, changes nothing.
        store.delete("alice", "id-1").await.unwrap();
        store.delete("ghost", "id-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_only_touches_the_given_user() {
        let store = InMemoryTranscriptionStore::new();
        store
            .upsert("alice", record_with_id("alice", "id-1", "alice's"))
            .await
            .unwrap();
        store
            .upsert("bob", record_with_id("bob", "id-1", "bob's"))
            .await
            .unwrap();

        store.delete("bob", "id-1").await.unwrap();

        assert!(store
            .get_by_user_and_id("alice", "id-1")
            .await
            .unwrap()
            .is_some());
        assert!(store.list_by_user("bob").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_keep_every_record() {
        let store = Arc::new(InMemoryTranscriptionStore::new());

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let record = record_with_id("alice", &format!("id-{}", i), "t");
                store.upsert("alice", record).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let list = store.list_by_user("alice").await.unwrap();
        assert_eq!(list.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_of_one_id_never_duplicate() {
        let store = Arc::new(InMemoryTranscriptionStore::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let record = record_with_id("alice", "shared-id", &format!("t{}", i));
                store.upsert("alice", record).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let list = store.list_by_user("alice").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "shared-id");
    }
}
