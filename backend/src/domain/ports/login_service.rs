//! Driving ports for login use-cases.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them to
//! authenticate a caller without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute mocks instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for password authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no account has the email.
    /// - `Unauthorized` on a password mismatch or an account without one.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Domain use-case port for face-descriptor authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaceLoginService: Send + Sync {
    /// Match `face_data` against enrolled accounts.
    ///
    /// # Errors
    ///
    /// - `NotImplemented` when face matching is switched off.
    /// - `InvalidRequest` when `face_data` is not a descriptor.
    /// - `NotFound` when no account has enrolled face data.
    /// - `Unauthorized` when no enrolled face is close enough.
    async fn authenticate_face(&self, face_data: &str) -> Result<User, Error>;
}
