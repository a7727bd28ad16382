//! Salted password hashing built on PBKDF2-HMAC-SHA1.
//!
//! The encoded record is `base64(salt ‖ derived key)`: 16 random salt bytes
//! followed by a 20-byte key derived with 10,000 iterations. Consumers must
//! treat the string as opaque and only hand it back to [`verify`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use thiserror::Error;

use crate::utils::constants::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};

#[derive(Error, Debug)]
pub enum HashError {
    #[error("invalid hash format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, HashError>;

/// Hash a password under a fresh random salt.
///
/// Two calls with the same password produce different records; both verify.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    let mut record = [0u8; SALT_SIZE + KEY_SIZE];
    record[..SALT_SIZE].copy_from_slice(&salt);
    derive_key(password, &salt, &mut record[SALT_SIZE..]);

    STANDARD.encode(record)
}

/// Check a password against a record produced by [`hash`].
///
/// Re-derives the key from the embedded salt and compares the full key
/// width without an early exit.
pub fn verify(password: &str, encoded: &str) -> Result<bool> {
    let record = STANDARD
        .decode(encoded)
        .map_err(|e| HashError::InvalidFormat(e.to_string()))?;

    if record.len() != SALT_SIZE + KEY_SIZE {
        return Err(HashError::InvalidFormat(format!(
            "expected {} decoded bytes, got {}",
            SALT_SIZE + KEY_SIZE,
            record.len()
        )));
    }

    let mut derived = [0u8; KEY_SIZE];
    derive_key(password, &record[..SALT_SIZE], &mut derived);

    let mut difference = 0u8;
    for (ours, theirs) in derived.iter().zip(&record[SALT_SIZE..]) {
        difference |= ours ^ theirs;
    }

    Ok(difference == 0)
}

fn derive_key(password: &str, salt: &[u8], out: &mut [u8]) {
    pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, PBKDF2_ITERATIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_roundtrip() {
        let record = hash("hunter2");
        assert!(verify("hunter2", &record).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let record = hash("correct horse");
        assert!(!verify("battery staple", &record).unwrap());
    }

    #[test]
    fn test_distinct_salts_per_call() {
        let first = hash("same password");
        let second = hash("same password");

        assert_ne!(first, second);
        assert!(verify("same password", &first).unwrap());
        assert!(verify("same password", &second).unwrap());
    }

    #[test]
    fn test_empty_password_roundtrip() {
        let record = hash("");
        assert!(verify("", &record).unwrap());
        assert!(!verify("x", &record).unwrap());
    }

    #[test]
    fn test_malformed_base64_is_invalid_format() {
        let result = verify("anything", "not base64!!!");
        assert!(matches!(result, Err(HashError::InvalidFormat(_))));
    }

    #[test]
    fn test_wrong_decoded_length_is_invalid_format() {
        // Valid base64, but only 5 bytes once decoded
        let short = STANDARD.encode([1u8, 2, 3, 4, 5]);
        let result = verify("anything", &short);
        assert!(matches!(result, Err(HashError::InvalidFormat(_))));
    }

    #[test]
    fn test_record_layout() {
        let record = hash("layout");
        let decoded = STANDARD.decode(record).unwrap();
        assert_eq!(decoded.len(), SALT_SIZE + KEY_SIZE);
    }
}
