//! Browser sessions, backed by `tower-sessions`.
//!
//! The session layer issues and reads the `portal_session` cookie and hands every
//! request a [`Session`]. The wizard engine sees it only through [`BaseSession`].

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tower_sessions::cookie::{time, SameSite};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use super::BaseSession;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "portal_session";

/// Session layer over an in-memory store.
///
/// A session expires after `ttl` without a request.
pub fn session_layer(ttl: chrono::Duration, secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(ttl.num_seconds())))
}

#[async_trait]
impl BaseSession for Session {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get_value(key).await?)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.insert_value(key, value).await?;
        Ok(())
    }

    async fn unset(&self, key: &str) -> Result<()> {
        self.remove_value(key).await?;
        Ok(())
    }
}
