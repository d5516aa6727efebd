//! Process-wide store connection with single-flight initialisation.
//!
//! [`ConnectionManager`] is created once at startup and shared by every
//! repository. The first caller of [`ConnectionManager::connect`] opens the
//! connection; callers arriving while that attempt is in flight wait for it
//! rather than starting their own. A successful connection is reused until
//! [`ConnectionManager::shutdown`]. A failed attempt is not remembered, so the
//! next call tries again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{OnceCell, RwLock};

/// Failure to establish or use the store connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The store could not be reached or rejected the handshake.
    #[error("failed to connect to store: {message}")]
    Connect { message: String },

    /// The manager has been shut down.
    #[error("store connection has been shut down")]
    Closed,
}

impl ConnectionError {
    /// Create a connect error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Opens and closes connections to a concrete store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Cheaply clonable handle to an established connection.
    type Connection: Clone + Send + Sync + 'static;

    /// Open a connection and verify it is usable.
    async fn connect(&self) -> Result<Self::Connection, ConnectionError>;

    /// Release resources held by `connection`.
    async fn close(&self, connection: Self::Connection);
}

/// Lazily connected, shared store handle.
///
/// # Example
///
/// ```ignore
/// let manager = Arc::new(ConnectionManager::new(MongoConnector::new(config)));
/// let store = manager.connect().await?;
/// // ...
/// manager.shutdown().await;
/// ```
pub struct ConnectionManager<C: Connector> {
    connector: C,
    cell: RwLock<Arc<OnceCell<C::Connection>>>,
    closed: AtomicBool,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create a manager that has not connected yet.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            cell: RwLock::new(Arc::new(OnceCell::new())),
            closed: AtomicBool::new(false),
        }
    }

    /// Return the shared connection, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Connect`] when the attempt this caller
    /// started or joined fails, and [`ConnectionError::Closed`] after
    /// [`Self::shutdown`].
    pub async fn connect(&self) -> Result<C::Connection, ConnectionError> {
        // The read guard is held through initialisation so `shutdown` cannot
        // swap the cell out from under an attempt in flight.
        let cell = self.cell.read().await;
        if self.closed.load(Ordering::Acquire) {
            return Err(ConnectionError::Closed);
        }
        cell.get_or_try_init(|| async {
            tracing::info!("opening store connection");
            self.connector.connect().await.inspect_err(|error| {
                tracing::warn!(%error, "store connection attempt failed");
            })
        })
        .await
        .cloned()
    }

    /// Whether a connection is currently established.
    pub async fn is_connected(&self) -> bool {
        self.cell.read().await.initialized()
    }

    /// Close the connection, if any, and refuse further connects.
    ///
    /// Waits for an attempt already in flight and closes what it opened.
    pub async fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
        let previous = {
            let mut guard = self.cell.write().await;
            std::mem::replace(&mut *guard, Arc::new(OnceCell::new()))
        };
        if let Some(connection) = previous.get().cloned() {
            tracing::info!("closing store connection");
            self.connector.close(connection).await;
        }
    }
}
