//! Hybrid Handshake Cipher
//!
//! Pure cryptographic codec for the key exchange, no I/O:
//!
//! - a keyed SHA-1 digest proving possession of the API-key secret, and
//! - a hybrid RSA-OAEP + AES-256-CBC seal for the handshake payload.
//!
//! SHA-1 and OAEP-over-SHA-1 are fixed by the deployed oauth sources; the
//! digest keys a challenge nonce, it does not protect stored data.

use crate::error::{AuthError, Result};
use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use rsa::{BigUint, Oaep, RsaPublicKey};
use sha1::{Digest, Sha1};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// AES key length used for the payload seal.
const AES_KEY_LEN: usize = 32;

/// AES-CBC initialization-vector length.
const AES_IV_LEN: usize = 16;

/// Compute the keyed challenge digest: SHA-1 over `challenge ++ ";" ++ secret`,
/// base64-encoded.
///
/// Deterministic by design: the oauth source recomputes the same digest from
/// its copy of the secret to verify possession.
pub fn digest(secret: &str, challenge: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(challenge.as_bytes());
    hasher.update(b";");
    hasher.update(secret.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Decode a base64 big-endian integer into an arbitrary-precision value.
///
/// Key material must survive this decode bit-for-bit; going through any
/// fixed-width integer here would be a correctness bug, not a rounding
/// tolerance.
fn decode_big_integer(b64: &str) -> Result<BigUint> {
    let bytes = BASE64.decode(b64)?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Build an RSA public key from the base64-encoded exponent and modulus the
/// oauth source advertises.
pub fn decode_public_key(exponent_b64: &str, modulus_b64: &str) -> Result<RsaPublicKey> {
    let e = decode_big_integer(exponent_b64)?;
    let n = decode_big_integer(modulus_b64)?;
    Ok(RsaPublicKey::new(n, e)?)
}

/// Seal a plaintext payload for the server.
///
/// Generates a fresh random 32-byte AES key and 16-byte IV, RSA-OAEP-encrypts
/// `key ‖ iv` under the server's public key, AES-256-CBC-encrypts the payload
/// under `key`/`iv`, and returns `base64(rsa_ciphertext ‖ aes_ciphertext)`.
/// Every call draws fresh randomness; ciphertexts are never reused.
pub fn encrypt_for_server(public_key: &RsaPublicKey, plaintext: &str) -> Result<String> {
    let mut rng = rand::thread_rng();

    let mut key = [0u8; AES_KEY_LEN];
    let mut iv = [0u8; AES_IV_LEN];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);

    let mut key_and_iv = Vec::with_capacity(AES_KEY_LEN + AES_IV_LEN);
    key_and_iv.extend_from_slice(&key);
    key_and_iv.extend_from_slice(&iv);

    let rsa_ciphertext = public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), &key_and_iv)?;

    let aes_ciphertext = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| AuthError::CryptoError(format!("AES init failed: {}", e)))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut sealed = rsa_ciphertext;
    sealed.extend_from_slice(&aes_ciphertext);
    Ok(BASE64.encode(sealed))
}
