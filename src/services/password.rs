//! Resident password hashing.
//!
//! Stored form is `salt$digest`, both lowercase hex: a random 16-byte salt and
//! `SHA-256(salt_hex || password)`, where `salt_hex` is the salt's hex text as
//! stored, not its raw bytes. Plain passwords never reach the database or any
//! response body.

use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

fn digest(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::rng().random();
    let salt_hex = to_hex(&salt);
    let hash = digest(&salt_hex, password);
    format!("{salt_hex}${hash}")
}

/// Check a password against a stored `salt$digest` value.
#[cfg(test)]
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    digest(salt_hex, password) == expected
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
