//! Error types for the AKX client

/// Result type for AKX client operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors surfaced by the challenge-response key exchange.
///
/// None of these are recovered locally: the only recovery behavior in the
/// protocol is the single automatic replay after a successful handshake.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Challenge header could not be parsed into key/value pairs
    #[error("Malformed challenge header: {0}")]
    MalformedChallenge(String),

    /// The oauth source rejected the key-fetch step with a non-challenge error
    #[error("Key exchange failed: {0}")]
    KeyExchangeFailure(String),

    /// The oauth source rejected the encrypted handshake response
    #[error("Handshake rejected with status {status}: {reason}")]
    HandshakeRejected {
        /// Status returned by the oauth source
        status: u16,
        /// Response body, if any
        reason: String,
    },

    /// The replayed request was challenged again despite a fresh token
    #[error("Replayed request was challenged again (status {status})")]
    ReplayRejected {
        /// Challenge status of the replayed request
        status: u16,
    },

    /// Fetching a single-use token from an issuance endpoint failed
    #[error("Single-use token fetch failed: {0}")]
    TokenFetchFailed(String),

    /// Client-side configuration problem (malformed API key, bad URL)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Cryptographic operation failed
    #[error("Cryptographic error: {0}")]
    CryptoError(String),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl AuthError {
    /// Whether the error means the configured API key was rejected
    /// (as opposed to a transport or parsing failure).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::HandshakeRejected { .. } | AuthError::ReplayRejected { .. }
        )
    }
}

impl From<rsa::Error> for AuthError {
    fn from(err: rsa::Error) -> Self {
        AuthError::CryptoError(err.to_string())
    }
}

impl From<base64::DecodeError> for AuthError {
    fn from(err: base64::DecodeError) -> Self {
        AuthError::CryptoError(format!("base64 decode failed: {}", err))
    }
}
