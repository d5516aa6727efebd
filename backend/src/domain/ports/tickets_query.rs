//! Driving port for ticket listings.

use async_trait::async_trait;

use crate::domain::{Error, OwnerName, Ticket};

/// Domain use-case port for reading tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsQuery: Send + Sync {
    /// List tickets newest first, optionally restricted to one owner.
    async fn list(&self, owner: Option<OwnerName>) -> Result<Vec<Ticket>, Error>;
}
