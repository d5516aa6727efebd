//! Port abstraction for ticket persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewTicket, OwnerName, Ticket, TicketId, TicketStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ticket repository query failed: {message}",
    }
}

/// Listing filter; `owner: None` lists every ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Exact-match owner name.
    pub owner: Option<OwnerName>,
}

/// Port for storing and reading support tickets.
///
/// Implementations must return listings newest first and must treat an id
/// the store cannot interpret as absent rather than as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a ticket and return it with its store-assigned id.
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError>;

    /// List tickets matching `filter`, ordered by creation time descending.
    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError>;

    /// Fetch a ticket by id.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError>;

    /// Overwrite the status field only, returning the updated ticket.
    async fn set_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Option<Ticket>, TicketRepositoryError>;

    /// Remove a ticket, reporting whether it existed.
    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError>;
}
