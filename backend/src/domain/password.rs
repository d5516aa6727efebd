//! Salted password hashing.
//!
//! Hashes are stored as argon2id PHC strings, which embed the algorithm,
//! parameters and salt, so verification needs nothing but the stored value.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

/// Failure while producing or parsing a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

impl From<password_hash::Error> for PasswordHashError {
    fn from(value: password_hash::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// Argon2 PHC-formatted password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use bankdesk::domain::PasswordHash;
    ///
    /// let hash = PasswordHash::hash("hunter2").expect("hash");
    /// assert!(hash.verify("hunter2"));
    /// assert!(!hash.verify("hunter3"));
    /// ```
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(Self(phc.to_string()))
    }

    /// Wrap a PHC string loaded from storage, checking that it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        password_hash::PasswordHash::new(&phc)?;
        Ok(Self(phc))
    }

    /// Whether `password` matches this hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        password_hash::PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// The PHC string for persistence.
    #[must_use]
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
