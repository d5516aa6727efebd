//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Registration, Signup, User};

/// Domain use-case port for registering accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Lenient registration. `Conflict` on a duplicate email.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Strict signup. `Conflict` on a duplicate email, aadhar or mobile,
    /// reported in that order.
    async fn signup(&self, signup: Signup) -> Result<User, Error>;
}
