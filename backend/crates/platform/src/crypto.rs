//! Cryptographic Utilities
//!
//! Only what the portal needs: random secrets and HMAC-signed opaque tokens
//! for the client-scope cookie. Nothing here signs credentials.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Length of an HMAC-SHA256 tag
pub const MAC_LEN: usize = 32;

/// Random 32-byte key for signing client tokens
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// HMAC-SHA256 (RFC 2104) with a 32-byte key
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; MAC_LEN] {
    let pad = |fill: u8| {
        let mut block = [fill; 64];
        block.iter_mut().zip(key).for_each(|(b, k)| *b ^= k);
        block
    };

    let inner = Sha256::new()
        .chain_update(pad(0x36))
        .chain_update(data)
        .finalize();

    Sha256::new()
        .chain_update(pad(0x5c))
        .chain_update(inner)
        .finalize()
        .into()
}

/// Compare without short-circuiting on the first differing byte
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Sign `payload` into a cookie-safe token: base64url(payload || HMAC(payload))
pub fn sign_token(secret: &[u8; 32], payload: &[u8]) -> String {
    let mac = hmac_sha256(secret, payload);
    let mut data = Vec::with_capacity(payload.len() + MAC_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&mac);
    URL_SAFE_NO_PAD.encode(data)
}

/// Verify a token produced by [`sign_token`] and return its payload.
///
/// Returns `None` for bad encoding, wrong length, or a signature mismatch.
pub fn verify_token(secret: &[u8; 32], token: &str, payload_len: usize) -> Option<Vec<u8>> {
    let data = URL_SAFE_NO_PAD.decode(token).ok()?;
    if data.len() != payload_len + MAC_LEN {
        return None;
    }

    let (payload, provided) = data.split_at(payload_len);
    let expected = hmac_sha256(secret, payload);

    if !constant_time_eq(provided, &expected) {
        return None;
    }

    Some(payload.to_vec())
}
