//! Authentication primitives: login credentials and registration payloads.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, UserName, UserValidationError, required_field};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use bankdesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Lenient registration: name and email required, everything else optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: UserName,
    pub email: Email,
    pub password: Option<Zeroizing<String>>,
    pub face_data: Option<String>,
}

impl Registration {
    /// Validate raw registration input. Blank optional values count as absent.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: Option<&str>,
        face_data: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: password
                .filter(|value| !value.is_empty())
                .map(|value| Zeroizing::new(value.to_owned())),
            face_data: face_data
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Strict signup: every field is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub name: UserName,
    pub email: Email,
    pub password: Zeroizing<String>,
    pub mobile: String,
    pub aadhar: String,
    pub face_data: String,
}

/// Raw strict-signup fields as received from a client.
#[derive(Debug, Clone, Copy)]
pub struct SignupParts<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub mobile: &'a str,
    pub aadhar: &'a str,
    pub face_data: &'a str,
}

impl Signup {
    /// Validate raw signup input.
    pub fn try_from_parts(parts: SignupParts<'_>) -> Result<Self, UserValidationError> {
        if parts.password.is_empty() {
            return Err(UserValidationError::EmptyField { field: "password" });
        }
        Ok(Self {
            name: UserName::new(parts.name)?,
            email: Email::new(parts.email)?,
            password: Zeroizing::new(parts.password.to_owned()),
            mobile: required_field(parts.mobile, "mobile")?,
            aadhar: required_field(parts.aadhar, "aadhar")?,
            face_data: required_field(parts.face_data, "faceData")?,
        })
    }
}
