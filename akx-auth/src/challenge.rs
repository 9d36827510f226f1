//! Challenge Header Parsing
//!
//! The oauth source announces its key-exchange parameters in a
//! `WWW-Authenticate` header of comma-separated `key=value` tokens, e.g.
//!
//! ```text
//! exponent=AQAB,modulus=xyz==,challenge=abc123
//! ```
//!
//! Values may themselves contain `=` (base64 padding), so each token is split
//! on the FIRST `=` only. Deployed servers prefix some keys with
//! non-alphabetic noise, so the key is the trailing ASCII-alphabetic run of
//! the left side, falling back to the raw left side when no such run exists.
//!
//! WARNING: the trailing-alphabetic-run heuristic is fragile by construction
//! and is preserved exactly for wire compatibility. Any change in the
//! server's challenge-header formatting breaks it silently; keep the
//! adversarial cases below green when touching this module.

use crate::error::{AuthError, Result};
use std::collections::HashMap;

/// Parse a structured challenge header into a key/value map.
///
/// Fails with [`AuthError::MalformedChallenge`] if any token contains no `=`.
pub fn parse_challenge_header(header: &str) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();

    for token in header.split(',') {
        let (raw_key, value) = token.split_once('=').ok_or_else(|| {
            AuthError::MalformedChallenge(format!("token without '=': {:?}", token))
        })?;

        pairs.insert(extract_key(raw_key).to_string(), value.to_string());
    }

    Ok(pairs)
}

/// Isolate the key from the left side of a `key=value` token: the trailing
/// run of ASCII-alphabetic characters, or the raw left side when the run is
/// empty.
fn extract_key(raw: &str) -> &str {
    let run_start = raw
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i);

    match run_start {
        Some(i) => &raw[i..],
        None => raw,
    }
}

/// The key-exchange parameters carried by the oauth source's challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExchangeParams {
    /// RSA public exponent, base64-encoded big-endian
    pub exponent: String,

    /// RSA modulus, base64-encoded big-endian
    pub modulus: String,

    /// Server-issued nonce, echoed back keyed by the shared secret
    pub challenge: String,
}

impl KeyExchangeParams {
    /// Extract the typed parameters from a challenge header.
    pub fn from_header(header: &str) -> Result<Self> {
        let mut pairs = parse_challenge_header(header)?;

        let mut take = |key: &str| {
            pairs.remove(key).ok_or_else(|| {
                AuthError::MalformedChallenge(format!("challenge header missing {:?}", key))
            })
        };

        Ok(Self {
            exponent: take("exponent")?,
            modulus: take("modulus")?,
            challenge: take("challenge")?,
        })
    }
}
