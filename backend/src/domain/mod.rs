//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Ticket (alias to `ticket::Ticket`): support ticket with triage result.
//! - User (alias to `user::User`): account view without credentials.
//! - TicketService / AccountService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod capture;
pub mod error;
pub mod face;
pub mod password;
pub mod ports;
pub mod ticket;
pub mod ticket_service;
pub mod trace_id;
pub mod triage;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, Registration, Signup, SignupParts};
pub use self::capture::{CaptureEvent, CaptureSession, CaptureState, InvalidTransition};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::face::{FaceDescriptor, FaceDescriptorError, FaceMatch};
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::ticket::{
    NewTicket, OwnerName, QueryText, StatusTransitionError, Ticket, TicketCategory, TicketId,
    TicketStatus, TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::triage::{Priority, TopicPath, Urgency};
pub use self::user::{Email, NewUser, StoredUser, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bankdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("ticket not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
