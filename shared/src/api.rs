use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::guard::{GuardConfig, SessionFailurePolicy, DEFAULT_SESSION_TIMEOUT};
use crate::models::RootRoute;
use crate::routes::LOGIN_PATH;

// ============================================================================
// Shell configuration
// ============================================================================

/// Deployment settings the server publishes to the app at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub root_route: RootRoute,
    pub login_path: String,
    pub session_timeout_ms: u64,
    pub session_failure_policy: SessionFailurePolicy,
    /// Overrides the storage key the auth client persists its session under
    pub session_storage_key: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            root_route: RootRoute::default(),
            login_path: LOGIN_PATH.to_string(),
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT.as_millis() as u64,
            session_failure_policy: SessionFailurePolicy::default(),
            session_storage_key: None,
        }
    }
}

impl ShellConfig {
    pub fn guard_config(&self) -> GuardConfig {
        GuardConfig {
            login_path: self.login_path.clone(),
            session_timeout: Duration::from_millis(self.session_timeout_ms),
            failure_policy: self.session_failure_policy,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}
