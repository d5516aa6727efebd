//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-facing validation failure is an `invalid_request` error whose
//! `details` name the offending `field` and a stable `code`.

use serde_json::json;

use crate::domain::{Error, LoginValidationError, TicketValidationError, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidEmail,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, ErrorCode::MissingField, format!("missing required field: {name}"))
}

pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, ErrorCode::InvalidValue, message)
}

/// Reject absent or blank values.
pub(crate) fn require_text(value: Option<&str>, field: FieldName) -> Result<&str, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Body could not be decoded as the expected JSON shape.
pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed request body: {reason}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
}

pub(crate) fn ticket_validation_error(err: TicketValidationError) -> Error {
    let field = match &err {
        TicketValidationError::EmptyId => FieldName::new("id"),
        TicketValidationError::EmptyOwner => FieldName::new("name"),
        TicketValidationError::EmptyQuery => FieldName::new("query"),
        TicketValidationError::UnknownCategory { .. } => FieldName::new("category"),
        TicketValidationError::UnknownStatus { .. } => FieldName::new("status"),
    };
    match err {
        TicketValidationError::UnknownCategory { .. } | TicketValidationError::UnknownStatus { .. } => {
            invalid_value_error(field, err.to_string())
        }
        _ => missing_field_error(field),
    }
}

pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyId => missing_field_error(FieldName::new("userId")),
        UserValidationError::EmptyName => missing_field_error(FieldName::new("name")),
        UserValidationError::EmptyEmail => missing_field_error(FieldName::new("email")),
        UserValidationError::InvalidEmail => {
            field_error(FieldName::new("email"), ErrorCode::InvalidEmail, err.to_string())
        }
        UserValidationError::EmptyField { field } => missing_field_error(FieldName::new(field)),
    }
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => missing_field_error(FieldName::new("email")),
        LoginValidationError::EmptyPassword => missing_field_error(FieldName::new("password")),
    }
}
