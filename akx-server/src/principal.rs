//! Principal
//!
//! The authenticated identity behind a request, resolved by the Authorizer
//! from the caller's credentials. Carried through issuance for audit logging.

use serde::{Deserialize, Serialize};

/// A resolved caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity string, e.g. an API-key name or user id
    id: String,
}

impl Principal {
    /// Create a principal from its identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The identity string.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
