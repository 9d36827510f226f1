//! Error types for the token issuer

use thiserror::Error;

/// Result type for issuer operations
pub type Result<T> = std::result::Result<T, IssuerError>;

/// Errors surfaced by the `singleAuthToken` endpoints.
#[derive(Debug, Error)]
pub enum IssuerError {
    /// The caller's principal could not be resolved. Propagated verbatim
    /// from the Authorizer, never handled locally.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The Authorizer failed to mint a token
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl actix_web::error::ResponseError for IssuerError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;
        use actix_web::HttpResponse;

        let status = match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}
