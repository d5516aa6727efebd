//! Driving port for ticket mutations.
//!
//! HTTP handlers call [`TicketsCommand`] to raise, resolve and remove support
//! tickets. Triage runs behind the port, so callers only supply what the
//! customer typed.

use async_trait::async_trait;

use crate::domain::triage::Urgency;
use crate::domain::{Error, OwnerName, QueryText, Ticket, TicketCategory, TicketId, TicketStatus};

/// Request to raise a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTicketRequest {
    pub owner: OwnerName,
    pub category: TicketCategory,
    pub query: QueryText,
    pub urgency: Urgency,
}

/// Request to move a ticket to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicketStatusRequest {
    pub id: TicketId,
    pub status: TicketStatus,
}

/// Domain use-case port for ticket mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsCommand: Send + Sync {
    /// Triage and store a new `Pending` ticket.
    async fn create(&self, request: CreateTicketRequest) -> Result<Ticket, Error>;

    /// Change a ticket's status.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no ticket has the id.
    /// - `Conflict` when reopening a resolved ticket.
    async fn update_status(&self, request: UpdateTicketStatusRequest) -> Result<Ticket, Error>;

    /// Remove a ticket. `NotFound` when no ticket has the id.
    async fn delete(&self, id: &TicketId) -> Result<(), Error>;
}
