//! Session lookups against the Supabase client's persisted auth state.
//!
//! The Supabase JS client keeps the current session as JSON in
//! `localStorage` under `sb-<project-ref>-auth-token`. Signing in, refreshing
//! and signing out all happen on the Supabase side; this provider only reads
//! what is there.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use shared::api::ShellConfig;
use shared::{Session, SessionError, SessionProvider, Timer};

pub struct SupabaseSessionProvider {
    storage_key: String,
}

impl SupabaseSessionProvider {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        let key = config
            .session_storage_key
            .clone()
            .unwrap_or_else(|| storage_key_for(&config.supabase_url));
        Self::new(key)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn read_raw(&self) -> Result<Option<String>, SessionError> {
        let storage = web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))?;

        storage
            .get_item(&self.storage_key)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}

#[async_trait(?Send)]
impl SessionProvider for SupabaseSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        match self.read_raw()? {
            Some(raw) => parse_stored_session(&raw, Utc::now()),
            None => Ok(None),
        }
    }
}

/// Storage key the Supabase client derives from the project URL.
pub fn storage_key_for(supabase_url: &str) -> String {
    let host = supabase_url
        .split_once("://")
        .map_or(supabase_url, |(_, rest)| rest);
    let project_ref = host
        .split(['/', ':', '.'])
        .next()
        .unwrap_or_default();
    format!("sb-{}-auth-token", project_ref)
}

/// Turn a persisted session into a [`Session`], treating expired ones as absent.
pub fn parse_stored_session(
    raw: &str,
    now: DateTime<Utc>,
) -> Result<Option<Session>, SessionError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| SessionError::Malformed(e.to_string()))?;

    if value.is_null() {
        return Ok(None);
    }

    let has_token = value
        .get("access_token")
        .and_then(|t| t.as_str())
        .map_or(false, |t| !t.is_empty());
    if !has_token {
        return Err(SessionError::Malformed("missing access_token".to_string()));
    }

    // expires_at is in epoch seconds
    if let Some(expires_at) = value.get("expires_at").and_then(|e| e.as_i64()) {
        if expires_at <= now.timestamp() {
            tracing::debug!("Stored session expired at {}", expires_at);
            return Ok(None);
        }
    }

    Ok(Some(Session::new(value)))
}

pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo::timers::future::sleep(duration))
    }
}
