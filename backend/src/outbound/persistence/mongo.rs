//! MongoDB connector and store handle.
//!
//! The connector parses the configured URI, pings the server and ensures the
//! unique indexes exist before the connection is handed out. Collections are
//! reached through [`MongoStore`].

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use super::connection::{ConnectionError, Connector};
use super::documents::{TicketDocument, UserDocument};

/// Collection holding user accounts.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding support tickets.
pub const TICKETS_COLLECTION: &str = "tickets";
/// Database used when neither the settings nor the URI name one.
pub const DEFAULT_DATABASE: &str = "bankDB";

/// Configuration for the MongoDB connection.
///
/// # Example
///
/// ```ignore
/// let config = MongoConfig::new("mongodb://127.0.0.1:27017/bankDB")
///     .with_server_selection_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: Option<String>,
    server_selection_timeout: Duration,
}

impl MongoConfig {
    /// Create a configuration for `uri`.
    ///
    /// Defaults: database taken from the URI path (else `bankDB`), 5 second
    /// server selection timeout.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: None,
            server_selection_timeout: Duration::from_secs(5),
        }
    }

    /// Override the database name.
    #[must_use]
    pub fn with_database(mut self, database: Option<String>) -> Self {
        self.database = database;
        self
    }

    /// Set how long to wait for a reachable server.
    #[must_use]
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Connection URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Established MongoDB connection.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Typed `users` collection.
    pub(crate) fn users(&self) -> Collection<UserDocument> {
        self.database.collection(USERS_COLLECTION)
    }

    /// Typed `tickets` collection.
    pub(crate) fn tickets(&self) -> Collection<TicketDocument> {
        self.database.collection(TICKETS_COLLECTION)
    }

    /// Database name in use.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

/// [`Connector`] opening a [`MongoStore`].
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: MongoConfig,
}

impl MongoConnector {
    /// Create a connector for `config`.
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }
}

fn connect_error(stage: &str, error: &mongodb::error::Error) -> ConnectionError {
    ConnectionError::connect(format!("{stage}: {error}"))
}

async fn ensure_indexes(database: &Database) -> Result<(), mongodb::error::Error> {
    let unique_sparse = |field: &str| {
        IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build()
    };
    database
        .collection::<UserDocument>(USERS_COLLECTION)
        .create_indexes([
            unique_sparse("email"),
            unique_sparse("mobile"),
            unique_sparse("aadhar"),
        ])
        .await?;
    database
        .collection::<TicketDocument>(TICKETS_COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "userName": 1, "createdAt": -1 })
                .build(),
        )
        .await?;
    Ok(())
}

#[async_trait]
impl Connector for MongoConnector {
    type Connection = MongoStore;

    async fn connect(&self) -> Result<MongoStore, ConnectionError> {
        let mut options = ClientOptions::parse(self.config.uri())
            .await
            .map_err(|err| connect_error("invalid connection string", &err))?;
        options.server_selection_timeout = Some(self.config.server_selection_timeout);
        let database_name = self
            .config
            .database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

        let client = Client::with_options(options)
            .map_err(|err| connect_error("client construction failed", &err))?;
        let database = client.database(&database_name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| connect_error("ping failed", &err))?;
        ensure_indexes(&database)
            .await
            .map_err(|err| connect_error("index creation failed", &err))?;

        tracing::info!(database = %database_name, "connected to MongoDB");
        Ok(MongoStore { client, database })
    }

    async fn close(&self, connection: MongoStore) {
        connection.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults() {
        let config = MongoConfig::new("mongodb://localhost/bankDB");
        assert_eq!(config.uri(), "mongodb://localhost/bankDB");
        assert_eq!(config.database, None);
        assert_eq!(config.server_selection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn config_builder() {
        let config = MongoConfig::new("mongodb://localhost")
            .with_database(Some("other".into()))
            .with_server_selection_timeout(Duration::from_millis(250));
        assert_eq!(config.database.as_deref(), Some("other"));
        assert_eq!(config.server_selection_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_uri_is_a_connection_error() {
        let connector = MongoConnector::new(MongoConfig::new("postgres://localhost/db"));
        let error = connector.connect().await.expect_err("bad scheme");
        assert!(matches!(error, ConnectionError::Connect { .. }));
    }
}
