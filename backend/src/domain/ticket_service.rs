//! Support ticket domain service.
//!
//! Implements the ticket driving ports on top of a [`TicketRepository`]:
//! triage on create, forward-only status changes and deletes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CreateTicketRequest, TicketFilter, TicketRepository, TicketRepositoryError, TicketsCommand,
    TicketsQuery, UpdateTicketStatusRequest,
};
use crate::domain::triage::{classify, priority};
use crate::domain::{Error, NewTicket, OwnerName, Ticket, TicketId, TicketStatus};

/// Ticket service implementing [`TicketsCommand`] and [`TicketsQuery`].
#[derive(Clone)]
pub struct TicketService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TicketService<R> {
    /// Create a new service over `repo`, stamping tickets with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_repository_error(error: TicketRepositoryError) -> Error {
    match &error {
        TicketRepositoryError::Connection { .. } => {
            tracing::error!(%error, "ticket store unavailable");
            Error::internal("ticket store unavailable")
        }
        TicketRepositoryError::Query { .. } => {
            tracing::error!(%error, "ticket store query failed");
            Error::internal("ticket store error")
        }
    }
}

fn ticket_not_found(id: &TicketId) -> Error {
    Error::not_found(format!("ticket {id} not found"))
}

#[async_trait]
impl<R> TicketsCommand for TicketService<R>
where
    R: TicketRepository,
{
    async fn create(&self, request: CreateTicketRequest) -> Result<Ticket, Error> {
        let topic = classify(request.query.as_ref());
        let priority = priority(&topic, request.urgency);
        let ticket = NewTicket {
            owner: request.owner,
            category: request.category,
            query: request.query,
            status: TicketStatus::Pending,
            priority,
            topic,
            created_at: self.clock.utc(),
        };

        let created = self
            .repo
            .insert(ticket)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(
            ticket_id = %created.id,
            owner = %created.owner,
            topic = %created.topic,
            priority = created.priority.value(),
            "ticket created"
        );
        Ok(created)
    }

    async fn update_status(&self, request: UpdateTicketStatusRequest) -> Result<Ticket, Error> {
        let current = self
            .repo
            .find_by_id(&request.id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| ticket_not_found(&request.id))?;

        let next = current
            .status
            .transition_to(request.status)
            .map_err(|err| {
                Error::conflict(err.to_string()).with_details(serde_json::json!({
                    "currentStatus": err.from,
                    "requestedStatus": err.to,
                }))
            })?;
        if next == current.status {
            return Ok(current);
        }

        let updated = self
            .repo
            .set_status(&request.id, next)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| ticket_not_found(&request.id))?;
        tracing::info!(ticket_id = %updated.id, status = %updated.status, "ticket status updated");
        Ok(updated)
    }

    async fn delete(&self, id: &TicketId) -> Result<(), Error> {
        let removed = self.repo.delete(id).await.map_err(map_repository_error)?;
        if !removed {
            return Err(ticket_not_found(id));
        }
        tracing::info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TicketsQuery for TicketService<R>
where
    R: TicketRepository,
{
    async fn list(&self, owner: Option<OwnerName>) -> Result<Vec<Ticket>, Error> {
        self.repo
            .list(&TicketFilter { owner })
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
