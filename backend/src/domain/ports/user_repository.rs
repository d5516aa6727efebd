//! Port abstraction for user persistence adapters and their errors.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Email, NewUser, StoredUser, UserId};

use super::define_port_error;

/// User fields protected by a unique index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueUserField {
    Email,
    Mobile,
    Aadhar,
}

impl UniqueUserField {
    /// Document field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Aadhar => "aadhar",
        }
    }
}

impl fmt::Display for UniqueUserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique index rejected the write.
        Duplicate { field: String } => "a user with this {field} already exists",
    }
}

/// Port for account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its store-assigned id.
    async fn insert(&self, user: NewUser) -> Result<StoredUser, UserPersistenceError>;

    /// Fetch an account by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Fetch an account by email.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Whether any account already holds `value` in `field`.
    async fn exists(
        &self,
        field: UniqueUserField,
        value: &str,
    ) -> Result<bool, UserPersistenceError>;

    /// Accounts with enrolled face data.
    async fn list_with_face_data(&self) -> Result<Vec<StoredUser>, UserPersistenceError>;
}
