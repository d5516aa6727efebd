//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports are implemented by the domain services and consumed by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod ticket_repository;
mod tickets_command;
mod tickets_query;
mod transcription;
mod user_profile_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use login_service::{MockFaceLoginService, MockLoginService};
pub use login_service::{FaceLoginService, LoginService};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{TicketFilter, TicketRepository, TicketRepositoryError};
#[cfg(test)]
pub use tickets_command::MockTicketsCommand;
pub use tickets_command::{CreateTicketRequest, TicketsCommand, UpdateTicketStatusRequest};
#[cfg(test)]
pub use tickets_query::MockTicketsQuery;
pub use tickets_query::TicketsQuery;
#[cfg(test)]
pub use transcription::MockTranscriber;
pub use transcription::{DisabledTranscriber, Transcriber, Transcription};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UniqueUserField, UserPersistenceError, UserRepository};
