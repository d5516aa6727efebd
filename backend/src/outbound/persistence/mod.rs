//! MongoDB persistence adapters.
//!
//! Repository implementations translate between BSON documents
//! (`documents.rs`) and domain types. Document shapes never leave this module.
//! Every repository shares one [`ConnectionManager`], so the process holds at
//! most one client and opens it lazily on first use.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bankdesk::outbound::persistence::{
//!     ConnectionManager, MongoConfig, MongoConnector, MongoTicketRepository,
//! };
//!
//! let manager = Arc::new(ConnectionManager::new(MongoConnector::new(
//!     MongoConfig::new("mongodb://localhost:27017/bankDB"),
//! )));
//! let tickets = MongoTicketRepository::new(Arc::clone(&manager));
//! ```

mod connection;
mod documents;
mod mongo;
mod mongo_error_mapping;
mod mongo_ticket_repository;
mod mongo_user_repository;

pub use connection::{ConnectionError, ConnectionManager, Connector};
pub use mongo::{
    DEFAULT_DATABASE, MongoConfig, MongoConnector, MongoStore, TICKETS_COLLECTION,
    USERS_COLLECTION,
};
pub use mongo_ticket_repository::MongoTicketRepository;
pub use mongo_user_repository::MongoUserRepository;
