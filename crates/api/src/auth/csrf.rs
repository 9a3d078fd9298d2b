//! Double-submit CSRF token derivation.
//!
//! The server stores a random secret in an httpOnly `csrf-token` cookie and
//! hands the client `hex(HMAC-SHA256(jwt_secret, secret))` in the
//! `X-CSRF-Token` response header on GET requests. Mutating admin requests
//! must echo that header; the server re-derives from the cookie secret and
//! compares. A token stolen without the cookie (or vice versa) is useless.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in the cookie secret.
pub const SECRET_BYTES: usize = 32;

/// Generate a fresh random hex string of `n` bytes (`2n` hex chars).
pub fn random_hex(n: usize) -> String {
    let mut buf = vec![0u8; n];
    rand::rng().fill(buf.as_mut_slice());
    hex::encode(&buf)
}

/// Derive the CSRF token for a given cookie secret.
pub fn derive_token(signing_key: &str, cookie_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(cookie_secret.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a presented token against the one derived from the cookie secret.
///
/// The comparison goes through [`Mac::verify_slice`], which is constant
/// time; a malformed hex token is rejected outright.
pub fn verify(signing_key: &str, cookie_secret: &str, presented: &str) -> bool {
    let Some(presented) = hex::decode(presented) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(cookie_secret.as_bytes());
    mac.verify_slice(&presented).is_ok()
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string; `None` on odd length or non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if !s.is_ascii() || s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}
