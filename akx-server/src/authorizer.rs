//! Authorizer Seam
//!
//! The Authorizer is an external collaborator: it resolves the caller's
//! principal from request credentials and mints single-use tokens, and it
//! alone owns token storage, redemption, and expiry. The endpoints in this
//! crate delegate to it entirely.
//!
//! [`StaticKeyAuthorizer`] is the in-memory implementation used by the
//! server binary and the tests.

use crate::error::{IssuerError, Result};
use crate::principal::Principal;
use crate::tenant::TenantScope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A tenant-scoped one-time credential. Opaque to this crate; the Authorizer
/// redeems it exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SingleUseToken(String);

impl SingleUseToken {
    /// Wrap an opaque token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the token value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Issuance response envelope: `{"Token": "<opaque>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The minted token
    #[serde(rename = "Token")]
    pub token: SingleUseToken,
}

/// Resolves principals and mints single-use tokens.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Resolve the caller's principal from the request's `Authorization`
    /// header value, if any.
    async fn resolve_principal(&self, auth_header: Option<&str>) -> Result<Principal>;

    /// Mint a single-use token bound to `(tenant, principal)`.
    ///
    /// Non-idempotent by design: every call mints a distinct token.
    async fn generate_single_use_token(
        &self,
        tenant: &TenantScope,
        principal: &Principal,
    ) -> Result<SingleUseToken>;
}

/// In-memory authorizer backed by a bearer-token → principal table.
///
/// Stands in for the production authorizer in the binary and in tests; it
/// mints UUID-valued tokens and does not track redemption.
#[derive(Debug, Default)]
pub struct StaticKeyAuthorizer {
    sessions: RwLock<HashMap<String, Principal>>,
}

impl StaticKeyAuthorizer {
    /// Create an authorizer with no known sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bearer token as belonging to `principal`.
    pub async fn insert_session(&self, bearer_token: impl Into<String>, principal: Principal) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(bearer_token.into(), principal);
    }
}

#[async_trait]
impl Authorizer for StaticKeyAuthorizer {
    async fn resolve_principal(&self, auth_header: Option<&str>) -> Result<Principal> {
        let header = auth_header
            .ok_or_else(|| IssuerError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            IssuerError::Unauthorized("Authorization header is not a bearer token".to_string())
        })?;

        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .cloned()
            .ok_or_else(|| IssuerError::Unauthorized("unknown bearer token".to_string()))
    }

    async fn generate_single_use_token(
        &self,
        _tenant: &TenantScope,
        _principal: &Principal,
    ) -> Result<SingleUseToken> {
        Ok(SingleUseToken::new(Uuid::new_v4().to_string()))
    }
}
