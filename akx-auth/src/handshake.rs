//! Challenge-Response Handshake
//!
//! Sequential state machine converting an authentication challenge into a
//! bearer token, one instance per triggered challenge:
//!
//! 1. **FetchKey** — unauthenticated POST to the oauth source; the reply is
//!    another challenge carrying `exponent`, `modulus`, and `challenge` in
//!    its `WWW-Authenticate` header.
//! 2. **BuildResponse** — keyed digest of the challenge, sealed together with
//!    the key name under the server's RSA public key.
//! 3. **Submit** — POST the sealed payload; a 200 yields the bearer token.
//! 4. **Complete** — store `Bearer <token>` in the [`AuthContext`].
//!
//! The states are strictly sequential and non-retrying: any failure at
//! FetchKey or Submit terminates the handshake and propagates to the
//! original caller. There is no automatic re-handshake loop, so a
//! permanently misconfigured key cannot cause a retry storm.

use crate::challenge::KeyExchangeParams;
use crate::cipher;
use crate::context::AuthContext;
use crate::error::{AuthError, Result};
use crate::{
    is_auth_challenge, CLIENT_CREDENTIALS_GRANT, GRANT_TYPE_HEADER, WWW_AUTHENTICATE_HEADER,
};
use std::sync::Arc;
use tracing::debug;

/// One challenge-response key exchange against an oauth source.
pub struct Handshake {
    client: reqwest::Client,
    context: Arc<AuthContext>,
}

impl Handshake {
    /// Create a handshake bound to a client and credential context.
    pub fn new(client: reqwest::Client, context: Arc<AuthContext>) -> Self {
        Self { client, context }
    }

    /// Run the full exchange against `oauth_source` and return the bearer
    /// token, which is also stored in the context.
    pub async fn run(&self, oauth_source: &str) -> Result<String> {
        let api_key = self
            .context
            .api_key()
            .ok_or_else(|| AuthError::KeyExchangeFailure("no API key configured".to_string()))?
            .clone();

        let params = self.fetch_key_params(oauth_source).await?;
        debug!(oauth_source, challenge = %params.challenge, "key exchange parameters received");

        let payload = build_payload(&params, api_key.name(), api_key.secret())?;

        let token = self.submit(oauth_source, payload).await?;
        debug!(oauth_source, "handshake complete, bearer token stored");

        self.context.set_bearer_token(&token).await;
        Ok(token)
    }

    /// FetchKey: ask the oauth source for its RSA parameters and challenge.
    ///
    /// The source answers with another challenge status; anything else is a
    /// terminal [`AuthError::KeyExchangeFailure`].
    async fn fetch_key_params(&self, oauth_source: &str) -> Result<KeyExchangeParams> {
        let response = self
            .client
            .post(oauth_source)
            .header(GRANT_TYPE_HEADER, CLIENT_CREDENTIALS_GRANT)
            .send()
            .await?;

        let status = response.status();
        if !is_auth_challenge(status) {
            return Err(AuthError::KeyExchangeFailure(format!(
                "oauth source answered {} instead of a challenge",
                status
            )));
        }

        let header = response
            .headers()
            .get(WWW_AUTHENTICATE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AuthError::KeyExchangeFailure(format!(
                    "challenge response carries no {} header",
                    WWW_AUTHENTICATE_HEADER
                ))
            })?
            .to_string();

        KeyExchangeParams::from_header(&header)
    }

    /// Submit: POST the sealed payload; a 200 yields the bearer token (with
    /// any trailing newline trimmed), anything else is terminal.
    async fn submit(&self, oauth_source: &str, payload: String) -> Result<String> {
        let response = self
            .client
            .post(oauth_source)
            .header(GRANT_TYPE_HEADER, CLIENT_CREDENTIALS_GRANT)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(AuthError::HandshakeRejected {
                status: status.as_u16(),
                reason,
            });
        }

        let token = response.text().await?;
        Ok(token.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// BuildResponse: the `exponent=…,modulus=…,data=…` wire payload, where
/// `data` seals the key name, the echoed challenge, and the keyed digest.
fn build_payload(params: &KeyExchangeParams, key_name: &str, secret: &str) -> Result<String> {
    let public_key = cipher::decode_public_key(&params.exponent, &params.modulus)?;

    let plaintext = join_pairs(&[
        ("api key name", key_name),
        ("challenge", &params.challenge),
        ("response", &cipher::digest(secret, &params.challenge)),
    ]);

    let sealed = cipher::encrypt_for_server(&public_key, &plaintext)?;

    Ok(join_pairs(&[
        ("exponent", &params.exponent),
        ("modulus", &params.modulus),
        ("data", &sealed),
    ]))
}

/// Serialize pairs as `key=value` joined by `,` — the oauth source's own
/// unescaped pair format.
fn join_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
