// Argon2id password hashing for the two account tables.
//
// Hashes are stored in PHC string form; the salt rides inside the hash, so
// verification needs nothing beyond the stored column.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

/// Check a plaintext password against a stored PHC hash string.
///
/// Comparison happens inside argon2 and is constant time; a stored hash
/// that does not parse is an error, not a mismatch.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow!("stored password hash is invalid: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_only_the_hashed_password() {
        let hash = hash_password("fern-and-frond-42").unwrap();
        assert!(verify_password("fern-and-frond-42", &hash).unwrap());
        assert!(!verify_password("fern-and-frond-43", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_salts_are_per_hash() {
        let first = hash_password("same-input").unwrap();
        let second = hash_password("same-input").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-input", &first).unwrap());
        assert!(verify_password("same-input", &second).unwrap());
    }

    #[test]
    fn test_stored_form_is_argon2id_phc() {
        let hash = hash_password("anything").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_garbage_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }
}
