//! Credential Context
//!
//! Holds the configured API key and the single bearer-token slot. The
//! context is an explicit, injectable value shared as `Arc<AuthContext>` and
//! threaded through the dispatcher; there is no process-wide global.
//!
//! The token slot is written only by a completed handshake and read by every
//! outgoing request. Two concurrently challenged requests may each run a
//! handshake; the last writer wins the slot and the loser's replay may be
//! challenged again. Callers see that outcome as
//! [`AuthError::ReplayRejected`](crate::error::AuthError::ReplayRejected).

use crate::credentials::ApiKeyCredential;
use tokio::sync::RwLock;

/// Request-scoped authentication state: the configured API key and the most
/// recently obtained bearer token.
#[derive(Debug)]
pub struct AuthContext {
    /// API key configured at startup, if any
    api_key: Option<ApiKeyCredential>,

    /// Full `Authorization` header value (`Bearer <token>`), once obtained
    auth_header: RwLock<Option<String>>,
}

impl AuthContext {
    /// Create a context with an optional configured API key.
    pub fn new(api_key: Option<ApiKeyCredential>) -> Self {
        Self {
            api_key,
            auth_header: RwLock::new(None),
        }
    }

    /// Create a context with no API key: challenges are surfaced to the
    /// caller unmodified and no handshake is ever attempted.
    pub fn unauthenticated() -> Self {
        Self::new(None)
    }

    /// The configured API key, if any.
    pub fn api_key(&self) -> Option<&ApiKeyCredential> {
        self.api_key.as_ref()
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current `Authorization` header value, if a handshake has completed.
    pub async fn auth_header(&self) -> Option<String> {
        self.auth_header.read().await.clone()
    }

    /// Store a freshly exchanged bearer token. Overwrites any previous token:
    /// the slot holds at most one live token per context.
    pub async fn set_bearer_token(&self, token: &str) {
        let mut slot = self.auth_header.write().await;
        *slot = Some(format!("Bearer {}", token));
    }
}
