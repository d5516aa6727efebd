//! MongoDB-backed `TicketRepository` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use mongodb::options::ReturnDocument;

use crate::domain::ports::{TicketFilter, TicketRepository, TicketRepositoryError};
use crate::domain::{NewTicket, Ticket, TicketId, TicketStatus};

use super::connection::ConnectionManager;
use super::documents::TicketDocument;
use super::mongo::{MongoConnector, MongoStore};
use super::mongo_error_mapping::map_ticket_error;

/// MongoDB-backed implementation of [`TicketRepository`].
#[derive(Clone)]
pub struct MongoTicketRepository {
    connection: Arc<ConnectionManager<MongoConnector>>,
}

impl MongoTicketRepository {
    /// Create a repository sharing `connection`.
    pub fn new(connection: Arc<ConnectionManager<MongoConnector>>) -> Self {
        Self { connection }
    }

    async fn store(&self) -> Result<MongoStore, TicketRepositoryError> {
        Ok(self.connection.connect().await?)
    }
}

/// Ids that are not ObjectIds cannot match any document.
fn object_id(id: &TicketId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_ref()).ok()
}

fn into_ticket(document: TicketDocument) -> Result<Ticket, TicketRepositoryError> {
    Ticket::try_from(document).map_err(|err| TicketRepositoryError::query(err.to_string()))
}

/// Decode one listed document, skipping it when it cannot be mapped.
fn listed_ticket(raw: Document) -> Option<Ticket> {
    let id = raw.get_object_id("_id").map(|oid| oid.to_hex()).ok();
    let decoded = bson::from_document::<TicketDocument>(raw)
        .map_err(|err| err.to_string())
        .and_then(|document| Ticket::try_from(document).map_err(|err| err.to_string()));
    match decoded {
        Ok(ticket) => Some(ticket),
        Err(error) => {
            tracing::warn!(id = ?id, %error, "skipping unreadable ticket document");
            None
        }
    }
}

fn owner_filter(filter: &TicketFilter) -> Document {
    filter
        .owner
        .as_ref()
        .map_or_else(Document::new, |owner| doc! { "userName": owner.as_ref() })
}

#[async_trait]
impl TicketRepository for MongoTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let store = self.store().await?;
        let result = store
            .tickets()
            .insert_one(TicketDocument::from(&ticket))
            .await
            .map_err(|err| map_ticket_error(&err))?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| TicketRepositoryError::query("store did not return an ObjectId"))?;
        let id = TicketId::new(id.to_hex())
            .map_err(|err| TicketRepositoryError::query(err.to_string()))?;
        Ok(ticket.with_id(id))
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let store = self.store().await?;
        let documents: Vec<Document> = store
            .tickets()
            .clone_with_type::<Document>()
            .find(owner_filter(filter))
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(|err| map_ticket_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_ticket_error(&err))?;
        Ok(documents.into_iter().filter_map(listed_ticket).collect())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let store = self.store().await?;
        store
            .tickets()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_ticket_error(&err))?
            .map(into_ticket)
            .transpose()
    }

    async fn set_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Option<Ticket>, TicketRepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let store = self.store().await?;
        store
            .tickets()
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$set": { "status": status.as_str() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|err| map_ticket_error(&err))?
            .map(into_ticket)
            .transpose()
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(false);
        };
        let store = self.store().await?;
        let result = store
            .tickets()
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_ticket_error(&err))?;
        Ok(result.deleted_count > 0)
    }
}
