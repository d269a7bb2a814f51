//! services/api/src/auth.rs
//!
//! The authentication service. It composes the user store with the in-process
//! session store and implements the demo Google sign-in flow.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use youtext_core::domain::UserProfile;
use youtext_core::ports::{PortResult, UserStore};

//=========================================================================================
// Session Store
//=========================================================================================

/// Holds the single active token per user id.
///
/// Tokens live only as long as the process, so this store sits behind no port;
/// a durable backend would have nothing to persist here.
#[derive(Default)]
pub struct SessionStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` as the user's active token, replacing any prior one.
    pub async fn put(&self, user_id: &str, token: String) {
        self.tokens.write().await.insert(user_id.to_owned(), token);
    }

    pub async fn get(&self, user_id: &str) -> Option<String> {
        self.tokens.read().await.get(user_id).cloned()
    }

    pub async fn remove(&self, user_id: &str) {
        self.tokens.write().await.remove(user_id);
    }
}

//=========================================================================================
// Auth Service
//=========================================================================================

/// Composes the user store and the session store behind one interface for the
/// web layer.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            sessions: SessionStore::new(),
        }
    }

    /// Signs a user in from a Google credential.
    ///
    /// The credential is never verified against Google; this is a demo stub.
    /// An existing profile (matched by email, case-insensitively) keeps its id
    /// and creation time but takes the new display name; otherwise a fresh
    /// profile is created. Either way the profile is upserted and a
    /// deterministic token becomes the user's active session, replacing any
    /// prior one.
    pub async fn sign_in_with_google(
        &self,
        credential: &str,
        email: &str,
        display_name: &str,
    ) -> PortResult<UserProfile> {
        // 1. Find-or-create the profile for this email.
        let profile = match self.users.get_by_email(email).await? {
            Some(existing) => existing.with_display_name(display_name),
            None => UserProfile::new(email, display_name),
        };

        // 2. Persist the profile.
        let profile = self.users.upsert(profile).await?;

        // 3. Mint the active token for this sign-in.
        let token = demo_token(credential, &profile.id);
        self.sessions.put(&profile.id, token).await;

        Ok(profile)
    }

    /// Looks a profile up by id. Pure read, no session side effects.
    pub async fn find_by_id(&self, user_id: &str) -> PortResult<Option<UserProfile>> {
        self.users.get_by_id(user_id).await
    }

    /// Returns the user's active token, if one exists.
    pub async fn get_active_token(&self, user_id: &str) -> Option<String> {
        self.sessions.get(user_id).await
    }

    /// Revokes the user's active token. Unknown users are a no-op.
    pub async fn sign_out(&self, user_id: &str) {
        self.sessions.remove(user_id).await;
    }
}

/// Deterministic demo token: a name-based UUID over `credential:user_id`.
///
/// The same credential and user id always yield the same token. This stands in
/// for a verified OAuth exchange and must not be treated as a security
/// boundary.
fn demo_token(credential: &str, user_id: &str) -> String {
    let seed = format!("{}:{}", credential, user_id);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
}
