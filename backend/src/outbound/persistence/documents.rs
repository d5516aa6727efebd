//! BSON document shapes for the `users` and `tickets` collections.
//!
//! These are internal to the persistence layer. Conversion into domain types
//! re-validates every field so a hand-edited document cannot smuggle an
//! invalid value into the domain.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Email, NewTicket, NewUser, OwnerName, PasswordHash, Priority, QueryText, StoredUser, Ticket,
    TicketId, TopicPath, Urgency, User, UserId, UserName, triage,
};

/// A stored document failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {collection} document {id}: {reason}")]
pub(crate) struct CorruptDocument {
    collection: &'static str,
    id: String,
    reason: String,
}

impl CorruptDocument {
    fn new(collection: &'static str, id: Option<ObjectId>, reason: impl ToString) -> Self {
        Self {
            collection,
            id: id.map_or_else(|| "<unsaved>".to_owned(), |oid| oid.to_hex()),
            reason: reason.to_string(),
        }
    }
}

pub(crate) fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
}

/// `tickets` collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TicketDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_name: String,
    pub category: String,
    pub query: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default)]
    pub topic: Vec<String>,
    pub created_at: bson::DateTime,
}

impl From<&NewTicket> for TicketDocument {
    fn from(ticket: &NewTicket) -> Self {
        Self {
            id: None,
            user_name: ticket.owner.to_string(),
            category: ticket.category.as_str().to_owned(),
            query: ticket.query.as_ref().to_owned(),
            status: ticket.status.as_str().to_owned(),
            priority: Some(i32::from(ticket.priority.value())),
            topic: ticket.topic.segments().to_vec(),
            created_at: to_bson_datetime(ticket.created_at),
        }
    }
}

impl TryFrom<TicketDocument> for Ticket {
    type Error = CorruptDocument;

    fn try_from(document: TicketDocument) -> Result<Self, Self::Error> {
        let corrupt = |reason: &dyn ToString| {
            CorruptDocument::new("tickets", document.id, reason.to_string())
        };
        let id = document
            .id
            .ok_or_else(|| corrupt(&"missing _id"))
            .and_then(|oid| TicketId::new(oid.to_hex()).map_err(|err| corrupt(&err)))?;
        let created_at =
            from_bson_datetime(document.created_at).ok_or_else(|| corrupt(&"createdAt out of range"))?;
        let query = QueryText::new(&document.query).map_err(|err| corrupt(&err))?;
        // Tickets written before triage existed carry neither field.
        let topic = if document.topic.is_empty() {
            triage::classify(query.as_ref())
        } else {
            TopicPath::from_segments(document.topic)
        };
        let priority = document.priority.map_or_else(
            || triage::priority(&topic, Urgency::Normal),
            Priority::clamped,
        );
        Ok(Self {
            id,
            owner: OwnerName::new(&document.user_name).map_err(|err| corrupt(&err))?,
            category: document.category.parse().map_err(|err| corrupt(&err))?,
            query,
            status: document.status.parse().map_err(|err| corrupt(&err))?,
            priority,
            topic,
            created_at,
        })
    }
}

/// `users` collection document. Optional fields are omitted rather than
/// stored as null so the sparse unique indexes ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_data: Option<String>,
    pub created_at: bson::DateTime,
}

impl From<&NewUser> for UserDocument {
    fn from(user: &NewUser) -> Self {
        Self {
            id: None,
            name: user.name.to_string(),
            email: user.email.to_string(),
            password: user
                .password_hash
                .as_ref()
                .map(|hash| hash.as_phc().to_owned()),
            mobile: user.mobile.clone(),
            aadhar: user.aadhar.clone(),
            face_data: user.face_data.clone(),
            created_at: to_bson_datetime(user.created_at),
        }
    }
}

impl TryFrom<UserDocument> for StoredUser {
    type Error = CorruptDocument;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let corrupt =
            |reason: &dyn ToString| CorruptDocument::new("users", document.id, reason.to_string());
        let id = document
            .id
            .ok_or_else(|| corrupt(&"missing _id"))
            .and_then(|oid| UserId::new(oid.to_hex()).map_err(|err| corrupt(&err)))?;
        let password_hash = document
            .password
            .map(PasswordHash::from_phc)
            .transpose()
            .map_err(|err| corrupt(&err))?;
        let created_at =
            from_bson_datetime(document.created_at).ok_or_else(|| corrupt(&"createdAt out of range"))?;
        Ok(Self {
            user: User {
                id,
                name: UserName::new(&document.name).map_err(|err| corrupt(&err))?,
                email: Email::new(&document.email).map_err(|err| corrupt(&err))?,
                mobile: document.mobile,
                aadhar: document.aadhar,
                created_at,
            },
            password_hash,
            face_data: document.face_data,
        })
    }
}
