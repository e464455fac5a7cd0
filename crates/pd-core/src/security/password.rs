use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashFailed(String),
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),
}

/// Hash a password using bcrypt with a freshly generated random salt.
///
/// The returned blob is self-describing: algorithm tag, cost factor, and
/// salt are embedded, so verification needs nothing beyond the blob itself.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash(password, DEFAULT_COST).map_err(|e| PasswordError::HashFailed(e.to_string()))
}

/// Verify a candidate password against a stored bcrypt blob.
///
/// The candidate is re-hashed with the salt and cost embedded in `hashed`
/// and the digests are compared in constant time. A mismatch returns
/// `Ok(false)`; only a blob that does not parse as a bcrypt hash is an error.
pub fn verify_password(hashed: &str, candidate: &str) -> Result<bool, PasswordError> {
    verify(candidate, hashed).map_err(|e| PasswordError::MalformedCredential(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "TestPassword123!";
        let hash = hash_password(password).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password(&hash, password).unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_different_salts_different_hashes() {
        let h1 = hash_password("password1").unwrap();
        let h2 = hash_password("password1").unwrap();
        // Same password should produce different blobs (different salts)
        assert_ne!(h1, h2);
        assert!(verify_password(&h1, "password1").unwrap());
        assert!(verify_password(&h2, "password1").unwrap());
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hash = hash_password("").unwrap();
        assert!(verify_password(&hash, "").unwrap());
        assert!(!verify_password(&hash, "not-empty").unwrap());
    }

    #[test]
    fn test_malformed_blob_is_an_error() {
        let result = verify_password("not-a-bcrypt-blob", "anything");
        assert!(matches!(
            result.unwrap_err(),
            PasswordError::MalformedCredential(_)
        ));
    }
}
