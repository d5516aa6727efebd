//! Classification of driver errors into repository port errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::domain::ports::{TicketRepositoryError, UniqueUserField, UserPersistenceError};

use super::connection::ConnectionError;

const DUPLICATE_KEY: i32 = 11000;

/// Whether the error means the server could not be reached.
pub(super) fn is_connection_failure(error: &MongoError) -> bool {
    matches!(
        *error.kind,
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

/// Server error code for write and command failures.
fn server_code(error: &MongoError) -> Option<i32> {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

/// Field named by the violated unique index, if the error is a duplicate key.
///
/// The server reports the index in the message, e.g.
/// `E11000 duplicate key error collection: bankDB.users index: mobile_1 dup key`.
pub(super) fn duplicate_user_field(error: &MongoError) -> Option<UniqueUserField> {
    if server_code(error) != Some(DUPLICATE_KEY) {
        return None;
    }
    let message = error.to_string();
    let index = message
        .split_once("index:")
        .map_or(message.as_str(), |(_, rest)| rest);
    [
        UniqueUserField::Mobile,
        UniqueUserField::Aadhar,
        UniqueUserField::Email,
    ]
    .into_iter()
    .find(|field| index.trim_start().starts_with(field.as_str()))
    .or(Some(UniqueUserField::Email))
}

pub(super) fn map_user_error(error: &MongoError) -> UserPersistenceError {
    if let Some(field) = duplicate_user_field(error) {
        return UserPersistenceError::duplicate(field.as_str());
    }
    if is_connection_failure(error) {
        UserPersistenceError::connection(error.to_string())
    } else {
        UserPersistenceError::query(error.to_string())
    }
}

pub(super) fn map_ticket_error(error: &MongoError) -> TicketRepositoryError {
    if is_connection_failure(error) {
        TicketRepositoryError::connection(error.to_string())
    } else {
        TicketRepositoryError::query(error.to_string())
    }
}

impl From<ConnectionError> for UserPersistenceError {
    fn from(error: ConnectionError) -> Self {
        Self::connection(error.to_string())
    }
}

impl From<ConnectionError> for TicketRepositoryError {
    fn from(error: ConnectionError) -> Self {
        Self::connection(error.to_string())
    }
}
