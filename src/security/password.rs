//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hash and salt are stored as separate base64 strings. Derivation is
//! CPU-heavy; async callers should run these functions on
//! `tokio::task::spawn_blocking`.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Encoded output of [`hash_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub hash: String,
    pub salt: String,
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> PasswordHash {
    let salt: [u8; SALT_LEN] = rand::rng().random();
    let key = derive_key(password, &salt);

    PasswordHash {
        hash: STANDARD.encode(key),
        salt: STANDARD.encode(salt),
    }
}

/// Check a password against a stored hash and salt.
///
/// Undecodable hash or salt is treated as a mismatch.
#[must_use]
pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    let (Ok(expected), Ok(salt)) = (STANDARD.decode(hash), STANDARD.decode(salt)) else {
        return false;
    };

    let actual = derive_key(password, &salt);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a digit
/// and a character that is neither letter nor digit.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_numeric());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    has_upper && has_lower && has_digit && has_special
}
