//! Single-Use Token Client Helper
//!
//! Single-use tokens exist for places where headers cannot be attached: a
//! direct browser navigation to a download URL, an `<img>` source, a
//! streaming export. The client fetches one from the tenant's
//! `singleAuthToken` endpoint (through the dispatcher, so a challenged fetch
//! handshakes like any other request) and appends it to the bare URL as a
//! query parameter the server redeems exactly once.

use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::{AuthError, Result};
use serde::Deserialize;

/// Query parameter the resource server redeems a single-use token from.
pub const SINGLE_AUTH_TOKEN_PARAM: &str = "singleUseAuthToken";

/// Issuance envelope returned by the `singleAuthToken` endpoints.
#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    #[serde(rename = "Token")]
    token: String,
}

/// Fetch a single-use token from `endpoint_url` (a `…/singleAuthToken` URL).
pub async fn fetch_single_auth_token(
    dispatcher: &RequestDispatcher,
    endpoint_url: &str,
) -> Result<String> {
    let response = dispatcher.send(&ApiRequest::get(endpoint_url)).await?;

    if !response.status.is_success() {
        return Err(AuthError::TokenFetchFailed(format!(
            "endpoint answered {}",
            response.status
        )));
    }

    let envelope: TokenEnvelope = response
        .json()
        .map_err(|e| AuthError::TokenFetchFailed(format!("malformed token envelope: {}", e)))?;

    Ok(envelope.token)
}

/// Append a single-use token to a bare URL.
pub fn append_single_auth_token(url: &str, token: &str) -> Result<String> {
    let mut url = url::Url::parse(url).map_err(|e| {
        AuthError::ConfigError(format!("invalid URL for single-use token: {}", e))
    })?;

    url.query_pairs_mut()
        .append_pair(SINGLE_AUTH_TOKEN_PARAM, token);

    Ok(url.into())
}
