//! # akx-auth: API-Key Exchange Client
//!
//! Client side of the AKX challenge-response protocol. A client holding a
//! long-lived API-key secret authenticates to a multi-tenant resource server
//! without ever transmitting the secret: an authentication challenge is
//! converted into a short-lived bearer token via a hybrid RSA+AES key
//! exchange, and the original request is replayed once with the new token.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  RequestDispatcher::send(request)                    │
//! │  ── 401/412 + OAuth-Source ──▶ Handshake             │
//! └──────────────────────────────────────────────────────┘
//!                        ↓
//!      ┌─────────────────────────────────────┐
//!      │  FetchKey: POST oauth source        │
//!      │  ◀── WWW-Authenticate:              │
//!      │      exponent, modulus, challenge   │
//!      └─────────────────────────────────────┘
//!                        ↓
//!      ┌─────────────────────────────────────┐
//!      │  BuildResponse: digest(secret,      │
//!      │  challenge) sealed with RSA+AES-CBC │
//!      └─────────────────────────────────────┘
//!                        ↓
//!      ┌─────────────────────────────────────┐
//!      │  Submit: POST sealed payload        │
//!      │  ◀── bearer token                   │
//!      └─────────────────────────────────────┘
//!                        ↓
//!      ┌─────────────────────────────────────┐
//!      │  Complete: store token, replay the  │
//!      │  original request exactly once      │
//!      └─────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod challenge;
pub mod cipher;
pub mod context;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod handshake;
pub mod single_auth;

// Re-exports for convenience
pub use challenge::{parse_challenge_header, KeyExchangeParams};
pub use context::AuthContext;
pub use credentials::ApiKeyCredential;
pub use dispatcher::{ApiRequest, ApiResponse, RequestDispatcher};
pub use error::{AuthError, Result};
pub use handshake::Handshake;

/// Header carrying the oauth-source URL on an authentication challenge.
pub const OAUTH_SOURCE_HEADER: &str = "OAuth-Source";

/// Header carrying the key-exchange parameters on the oauth source's challenge.
pub const WWW_AUTHENTICATE_HEADER: &str = "WWW-Authenticate";

/// Marker header telling the server the client is able to handshake.
pub const HAS_API_KEY_HEADER: &str = "Has-Api-Key";

/// Grant-type header sent on both oauth-source calls.
pub const GRANT_TYPE_HEADER: &str = "grant_type";

/// The only grant type the oauth source accepts.
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Whether a response status is an authentication challenge.
///
/// The deployed servers answer 412 Precondition Failed; 401 Unauthorized is
/// accepted as well for servers that use the conventional status.
pub fn is_auth_challenge(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 401 | 412)
}
