//! Support ticket data model.
//!
//! Tickets are owned by a user *name* rather than a user id; the name is a
//! free-form label supplied by the client. Status only ever moves forwards
//! from `Pending` to `Resolved`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::triage::{Priority, TopicPath};

/// Validation errors raised while building ticket values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketValidationError {
    /// Ticket identifiers must not be blank.
    #[error("ticket id must not be empty")]
    EmptyId,
    /// Owner name was missing or blank.
    #[error("owner name must not be empty")]
    EmptyOwner,
    /// Query text was missing or blank.
    #[error("query must not be empty")]
    EmptyQuery,
    /// Category label is not one of the supported values.
    #[error("unknown category {value:?}; expected Loan, Account, Fraud, Security or Other")]
    UnknownCategory { value: String },
    /// Status label is not one of the supported values.
    #[error("unknown status {value:?}; expected Pending or Resolved")]
    UnknownStatus { value: String },
}

/// Opaque store-assigned ticket identifier.
///
/// The format belongs to the backing store; callers only compare and echo
/// it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Wrap a raw identifier, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, TicketValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TicketValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TicketId> for String {
    fn from(value: TicketId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = TicketValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name of the customer that raised the ticket, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerName(String);

impl OwnerName {
    /// Validate and normalise an owner name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, TicketValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TicketValidationError::EmptyOwner);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for OwnerName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OwnerName> for String {
    fn from(value: OwnerName) -> Self {
        value.0
    }
}

impl TryFrom<String> for OwnerName {
    type Error = TicketValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text description of the customer's problem, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueryText(String);

impl QueryText {
    /// Validate and normalise query text.
    pub fn new(query: impl AsRef<str>) -> Result<Self, TicketValidationError> {
        let trimmed = query.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TicketValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for QueryText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QueryText> for String {
    fn from(value: QueryText) -> Self {
        value.0
    }
}

impl TryFrom<String> for QueryText {
    type Error = TicketValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Coarse category chosen by the customer when raising a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TicketCategory {
    Loan,
    Account,
    Fraud,
    Security,
    Other,
}

impl TicketCategory {
    /// Wire label for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "Loan",
            Self::Account => "Account",
            Self::Fraud => "Fraud",
            Self::Security => "Security",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketCategory {
    type Err = TicketValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Loan" => Ok(Self::Loan),
            "Account" => Ok(Self::Account),
            "Fraud" => Ok(Self::Fraud),
            "Security" => Ok(Self::Security),
            "Other" => Ok(Self::Other),
            _ => Err(TicketValidationError::UnknownCategory {
                value: value.to_owned(),
            }),
        }
    }
}

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TicketStatus {
    #[default]
    Pending,
    Resolved,
}

/// Rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ticket cannot move from {from} to {to}")]
pub struct StatusTransitionError {
    /// Current status.
    pub from: TicketStatus,
    /// Requested status.
    pub to: TicketStatus,
}

impl TicketStatus {
    /// Wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
        }
    }

    /// Validate a move to `next`.
    ///
    /// Re-applying the current status is accepted; reopening a resolved
    /// ticket is not.
    ///
    /// # Examples
    /// ```
    /// use bankdesk::domain::TicketStatus;
    ///
    /// assert!(TicketStatus::Pending.transition_to(TicketStatus::Resolved).is_ok());
    /// assert!(TicketStatus::Resolved.transition_to(TicketStatus::Pending).is_err());
    /// ```
    pub fn transition_to(self, next: Self) -> Result<Self, StatusTransitionError> {
        match (self, next) {
            (Self::Resolved, Self::Pending) => Err(StatusTransitionError {
                from: self,
                to: next,
            }),
            _ => Ok(next),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TicketValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Pending" => Ok(Self::Pending),
            "Resolved" => Ok(Self::Resolved),
            _ => Err(TicketValidationError::UnknownStatus {
                value: value.to_owned(),
            }),
        }
    }
}

/// Ticket as handed to the repository for insertion; the store assigns the
/// id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub owner: OwnerName,
    pub category: TicketCategory,
    pub query: QueryText,
    pub status: TicketStatus,
    pub priority: Priority,
    pub topic: TopicPath,
    pub created_at: DateTime<Utc>,
}

impl NewTicket {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            owner: self.owner,
            category: self.category,
            query: self.query,
            status: self.status,
            priority: self.priority,
            topic: self.topic,
            created_at: self.created_at,
        }
    }
}

/// Persisted support ticket.
///
/// ## Invariants
/// - `owner` and `query` are trimmed and non-empty.
/// - `priority` lies in `1..=10`.
/// - `status` never moves from `Resolved` back to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[schema(value_type = String, example = "665f1c2e9b1d4a3f2c8e7a10")]
    pub id: TicketId,
    #[schema(value_type = String, example = "Bob")]
    pub owner: OwnerName,
    pub category: TicketCategory,
    #[schema(value_type = String, example = "Need a loan")]
    pub query: QueryText,
    pub status: TicketStatus,
    #[schema(value_type = u8, minimum = 1, maximum = 10)]
    pub priority: Priority,
    #[schema(value_type = Vec<String>, example = json!(["Cards & Loans", "Loans", "Personal Loan"]))]
    pub topic: TopicPath,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TicketStatus::Pending, TicketStatus::Resolved, true)]
    #[case(TicketStatus::Pending, TicketStatus::Pending, true)]
    #[case(TicketStatus::Resolved, TicketStatus::Resolved, true)]
    #[case(TicketStatus::Resolved, TicketStatus::Pending, false)]
    fn status_only_moves_forwards(
        #[case] from: TicketStatus,
        #[case] to: TicketStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.transition_to(to).is_ok(), allowed);
    }

    #[rstest]
    #[case("Loan", TicketCategory::Loan)]
    #[case(" Fraud ", TicketCategory::Fraud)]
    #[case("Other", TicketCategory::Other)]
    fn category_parses_wire_labels(#[case] raw: &str, #[case] expected: TicketCategory) {
        assert_eq!(raw.parse::<TicketCategory>(), Ok(expected));
    }

    #[rstest]
    #[case("loan")]
    #[case("Mortgage")]
    #[case("")]
    fn category_rejects_unknown_labels(#[case] raw: &str) {
        let err = raw.parse::<TicketCategory>().expect_err("unknown category");
        assert!(matches!(err, TicketValidationError::UnknownCategory { .. }));
    }

    #[rstest]
    #[case("   ", TicketValidationError::EmptyOwner)]
    #[case("", TicketValidationError::EmptyOwner)]
    fn owner_rejects_blank(#[case] raw: &str, #[case] expected: TicketValidationError) {
        assert_eq!(OwnerName::new(raw), Err(expected));
    }

    #[rstest]
    fn owner_and_query_are_trimmed() {
        let owner = OwnerName::new("  Alice ").expect("valid owner");
        let query = QueryText::new("\tNeed a loan\n").expect("valid query");
        assert_eq!(owner.as_ref(), "Alice");
        assert_eq!(query.as_ref(), "Need a loan");
    }

    #[rstest]
    fn ticket_serialises_camel_case() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let ticket = NewTicket {
            owner: OwnerName::new("Bob").expect("owner"),
            category: TicketCategory::Loan,
            query: QueryText::new("Need a loan").expect("query"),
            status: TicketStatus::Pending,
            priority: Priority::clamped(6),
            topic: TopicPath::from_segments(vec!["Cards & Loans".into(), "Loans".into()]),
            created_at,
        }
        .with_id(TicketId::new("t-1").expect("id"));

        let value = serde_json::to_value(&ticket).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "t-1",
                "owner": "Bob",
                "category": "Loan",
                "query": "Need a loan",
                "status": "Pending",
                "priority": 6,
                "topic": ["Cards & Loans", "Loans"],
                "createdAt": "2024-05-01T10:00:00Z",
            })
        );
    }
}
