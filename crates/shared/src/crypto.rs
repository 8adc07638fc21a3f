//! Cryptographic helpers for session tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates an opaque session token.
///
/// The token is handed to the browser in a cookie; only its SHA-256 hash
/// is persisted (see [`session_token_hash`]).
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash under which a session token is stored.
pub fn session_token_hash(token: &str) -> String {
    sha256_hex(token)
}
