//! # akx-server: Single-Use Token Issuance
//!
//! Server side of the AKX protocol: the `singleAuthToken` endpoint family.
//! Each tenant kind (database, file-system, counter-store) exposes a
//! structurally identical route that resolves the caller's principal and
//! mints a single-use token bound to `(tenant, principal)`.
//!
//! Token validation, storage, and expiry belong to the [`Authorizer`] — an
//! external collaborator behind a trait seam. This crate only shapes the
//! issuance contract and the response envelope.

#![warn(missing_docs)]

pub mod authorizer;
pub mod error;
pub mod principal;
pub mod routes;
pub mod tenant;

// Re-exports for convenience
pub use authorizer::{Authorizer, SingleUseToken, StaticKeyAuthorizer, TokenResponse};
pub use error::{IssuerError, Result};
pub use principal::Principal;
pub use routes::AppState;
pub use tenant::{TenantKind, TenantScope};
