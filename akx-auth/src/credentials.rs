//! API-Key Credential
//!
//! The client's long-lived identity: a name the server knows and a shared
//! secret that is never transmitted. Supplied at client startup; immutable.

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};

/// An API-key credential (`name` + `secret`).
///
/// The secret only ever participates in the keyed challenge digest; it is
/// excluded from serialization and redacted from debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyCredential {
    /// Key name, sent to the server in the encrypted handshake payload
    name: String,

    /// Shared secret, never sent over the wire
    #[serde(skip)]
    secret: String,
}

impl ApiKeyCredential {
    /// Create a credential from its parts.
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Parse the combined `name/secret` form the servers hand out.
    pub fn parse(combined: &str) -> Result<Self> {
        let (name, secret) = combined.split_once('/').ok_or_else(|| {
            AuthError::ConfigError("API key must be of the form name/secret".to_string())
        })?;

        if name.is_empty() || secret.is_empty() {
            return Err(AuthError::ConfigError(
                "API key name and secret must be non-empty".to_string(),
            ));
        }

        Ok(Self::new(name, secret))
    }

    /// Key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredential")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}
