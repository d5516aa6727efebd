//! In-memory implementations of the driven ports.
//!
//! They mirror the MongoDB adapters closely enough for HTTP-level tests:
//! opaque generated ids, newest-first listing and unique email, mobile and
//! aadhar values.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    TicketFilter, TicketRepository, TicketRepositoryError, UniqueUserField, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Email, NewTicket, NewUser, StoredUser, Ticket, TicketId, TicketStatus, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Ticket store held in a `Vec`, in insertion order.
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: Mutex<Vec<Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tickets.
    pub fn len(&self) -> usize {
        lock(&self.tickets).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let id = TicketId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| TicketRepositoryError::query(err.to_string()))?;
        let stored = ticket.with_id(id);
        lock(&self.tickets).push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let mut matching: Vec<Ticket> = lock(&self.tickets)
            .iter()
            .rev()
            .filter(|ticket| filter.owner.as_ref().is_none_or(|owner| &ticket.owner == owner))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        Ok(lock(&self.tickets)
            .iter()
            .find(|ticket| &ticket.id == id)
            .cloned())
    }

    async fn set_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Option<Ticket>, TicketRepositoryError> {
        let mut tickets = lock(&self.tickets);
        Ok(tickets.iter_mut().find(|ticket| &ticket.id == id).map(|ticket| {
            ticket.status = status;
            ticket.clone()
        }))
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        let mut tickets = lock(&self.tickets);
        let before = tickets.len();
        tickets.retain(|ticket| &ticket.id != id);
        Ok(tickets.len() < before)
    }
}

/// Account store enforcing the same uniqueness rules as the MongoDB indexes.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_value(user: &StoredUser, field: UniqueUserField) -> Option<&str> {
    match field {
        UniqueUserField::Email => Some(user.user.email.as_ref()),
        UniqueUserField::Mobile => user.user.mobile.as_deref(),
        UniqueUserField::Aadhar => user.user.aadhar.as_deref(),
    }
}

fn candidate_value(user: &NewUser, field: UniqueUserField) -> Option<&str> {
    match field {
        UniqueUserField::Email => Some(user.email.as_ref()),
        UniqueUserField::Mobile => user.mobile.as_deref(),
        UniqueUserField::Aadhar => user.aadhar.as_deref(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<StoredUser, UserPersistenceError> {
        let mut users = lock(&self.users);
        for field in [
            UniqueUserField::Email,
            UniqueUserField::Mobile,
            UniqueUserField::Aadhar,
        ] {
            let Some(value) = candidate_value(&user, field) else {
                continue;
            };
            if users
                .iter()
                .any(|existing| field_value(existing, field) == Some(value))
            {
                return Err(UserPersistenceError::duplicate(field.as_str()));
            }
        }
        let id = UserId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let stored = user.with_id(id);
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| &user.user.id == id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| &user.user.email == email)
            .cloned())
    }

    async fn exists(
        &self,
        field: UniqueUserField,
        value: &str,
    ) -> Result<bool, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .any(|user| field_value(user, field) == Some(value)))
    }

    async fn list_with_face_data(&self) -> Result<Vec<StoredUser>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .filter(|user| user.face_data.as_deref().is_some_and(|data| !data.is_empty()))
            .cloned()
            .collect())
    }
}
