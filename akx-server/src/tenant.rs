//! Tenant Scoping
//!
//! A tenant is a named resource scope a principal authenticates against: a
//! database, a file-system, or a counter-store. Single-use tokens are bound
//! to exactly one tenant.

use serde::{Deserialize, Serialize};

/// The kind of resource a tenant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantKind {
    /// A document database
    Database,

    /// A file-system
    FileSystem,

    /// A counter-store
    CounterStore,
}

impl TenantKind {
    /// Stable name for logging and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::FileSystem => "fs",
            Self::CounterStore => "counters",
        }
    }
}

/// One tenant: a kind plus a name. `name == None` addresses the system
/// database, served by the root `singleAuthToken` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantScope {
    kind: TenantKind,
    name: Option<String>,
}

impl TenantScope {
    /// The system database.
    pub fn system_database() -> Self {
        Self {
            kind: TenantKind::Database,
            name: None,
        }
    }

    /// A named database.
    pub fn database(name: impl Into<String>) -> Self {
        Self {
            kind: TenantKind::Database,
            name: Some(name.into()),
        }
    }

    /// A named file-system.
    pub fn file_system(name: impl Into<String>) -> Self {
        Self {
            kind: TenantKind::FileSystem,
            name: Some(name.into()),
        }
    }

    /// A named counter-store.
    pub fn counter_store(name: impl Into<String>) -> Self {
        Self {
            kind: TenantKind::CounterStore,
            name: Some(name.into()),
        }
    }

    /// The tenant kind.
    pub fn kind(&self) -> TenantKind {
        self.kind
    }

    /// The tenant name; `None` is the system database.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Audit label, e.g. `database/db1` or `database/<system>`.
    pub fn label(&self) -> String {
        format!(
            "{}/{}",
            self.kind.as_str(),
            self.name.as_deref().unwrap_or("<system>")
        )
    }
}
