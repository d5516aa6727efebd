//! User data model.
//!
//! [`User`] is the outward view of an account and never carries credential
//! material. [`StoredUser`] pairs it with the password hash and enrolled face
//! data for the authentication paths that need them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::password::PasswordHash;

/// Validation errors returned by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain an @ separating local part and domain")]
    InvalidEmail,
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Opaque store-assigned user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account holder name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and normalise a user name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the login handle.
///
/// Only the presence of a non-empty local part and domain is checked; the
/// unique index in the store is the source of truth for identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use bankdesk::domain::Email;
    ///
    /// assert!(Email::new(" ada@example.com ").is_ok());
    /// assert!(Email::new("ada").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trim an optional secondary identifier (mobile, aadhar), rejecting blanks.
pub(crate) fn required_field(
    value: &str,
    field: &'static str,
) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

/// Outward view of an account.
///
/// ## Invariants
/// - Carries no password or face material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "665f1c2e9b1d4a3f2c8e7a01")]
    pub id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub name: UserName,
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account as handed to the repository for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password_hash: Option<PasswordHash>,
    pub mobile: Option<String>,
    pub aadhar: Option<String>,
    pub face_data: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: UserId) -> StoredUser {
        StoredUser {
            user: User {
                id,
                name: self.name,
                email: self.email,
                mobile: self.mobile,
                aadhar: self.aadhar,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
            face_data: self.face_data,
        }
    }
}

/// Persisted account including credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: Option<PasswordHash>,
    pub face_data: Option<String>,
}

impl StoredUser {
    /// Drop credential material, keeping the outward view.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::InvalidEmail)]
    #[case("@example.com", UserValidationError::InvalidEmail)]
    #[case("ada@", UserValidationError::InvalidEmail)]
    fn email_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[rstest]
    fn name_is_trimmed() {
        let name = UserName::new("  Ada ").expect("valid name");
        assert_eq!(name.as_ref(), "Ada");
    }

    #[rstest]
    fn user_json_omits_credentials() {
        let stored = NewUser {
            name: UserName::new("Ada").expect("name"),
            email: Email::new("ada@example.com").expect("email"),
            password_hash: Some(PasswordHash::hash("pw").expect("hash")),
            mobile: None,
            aadhar: None,
            face_data: Some("[0.1, 0.2]".into()),
            created_at: Utc::now(),
        }
        .with_id(UserId::new("u-1").expect("id"));

        let value = serde_json::to_value(stored.into_user()).expect("serialise");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("faceData"));
        assert_eq!(object.get("email"), Some(&serde_json::json!("ada@example.com")));
    }

    #[rstest]
    fn required_field_names_the_field() {
        let err = required_field(" ", "mobile").expect_err("blank");
        assert_eq!(err.to_string(), "mobile must not be empty");
    }
}
