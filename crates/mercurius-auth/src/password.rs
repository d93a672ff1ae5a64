//! Password hashing.
//!
//! Hashes are argon2id PHC strings (`$argon2id$v=19$m=...`), so the
//! parameters travel with each stored hash.

use crate::AuthError;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use rand::Rng;

/// Password hasher configuration.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
    /// Minimum accepted password length.
    pub min_length: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            min_length: 8,
        }
    }
}

impl PasswordHasher {
    /// Cheap parameters for tests and local tooling.
    pub fn fast() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
            ..Self::default()
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let bytes: [u8; 16] = rand::thread_rng().gen();
        let salt = SaltString::encode_b64(&bytes)?;
        let hash = self.argon2()?.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// A wrong password yields `Ok(false)`; a malformed hash is an error.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate password strength.
    pub fn validate_password(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if password.trim().is_empty() {
            return Err(AuthError::WeakPassword(
                "Password must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = PasswordHasher::fast();
        let hash = hasher.hash("mudar-senha-123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify("mudar-senha-123", &hash).unwrap());
        assert!(!hasher.verify("outra-senha", &hash).unwrap());
    }

    #[test]
    fn test_verify_ignores_hasher_params() {
        let hash = PasswordHasher::fast().hash("admin1234").unwrap();
        assert!(PasswordHasher::default().verify("admin1234", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let err = PasswordHasher::fast().verify("x", "not-a-hash").unwrap_err();
        assert!(matches!(err, AuthError::Hash(_)));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = PasswordHasher::fast();
        let hash1 = hasher.hash("TestPassword1").unwrap();
        let hash2 = hasher.hash("TestPassword1").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_password_validation() {
        let hasher = PasswordHasher::default();
        assert!(hasher.validate_password("admin123").is_ok());
        assert!(hasher.validate_password("short").is_err());
        assert!(hasher.validate_password("        ").is_err());
    }
}
