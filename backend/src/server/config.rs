//! Server settings loaded via OrthoConfig and the runtime configuration
//! assembled from them.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use bankdesk::outbound::persistence::MongoConfig;

const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017/bankDB";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FACE_MATCH_THRESHOLD: f64 = 0.6;

/// Document store settings (`MONGODB_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MONGODB")]
pub struct StoreSettings {
    /// Connection URI.
    pub uri: Option<String>,
    /// Database name; defaults to the URI path, else `bankDB`.
    pub database: Option<String>,
}

impl StoreSettings {
    /// Configured URI, falling back to the local default.
    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }

    /// Connector configuration for these settings.
    pub fn mongo_config(&self) -> MongoConfig {
        MongoConfig::new(self.uri()).with_database(self.database.clone())
    }
}

/// HTTP server and feature-flag settings (`BANKDESK_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BANKDESK")]
pub struct ServerSettings {
    /// Listen address.
    pub bind_addr: Option<String>,
    /// Enable face-descriptor login.
    #[ortho_config(default = false)]
    pub face_matching: bool,
    /// Maximum Euclidean distance accepted by face login.
    pub face_match_threshold: Option<f64>,
    /// Serve canned demo transcriptions from `/api/transcribe`.
    #[ortho_config(default = false)]
    pub demo_transcription: bool,
}

impl ServerSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the configured address is not a socket
    /// address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid BANKDESK_BIND_ADDR {raw:?}: {err}"),
            )
        })
    }

    /// Face match threshold when face login is enabled.
    pub fn face_match_threshold(&self) -> Option<f64> {
        self.face_matching.then(|| {
            self.face_match_threshold
                .unwrap_or(DEFAULT_FACE_MATCH_THRESHOLD)
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) face_match_threshold: Option<f64>,
    pub(crate) demo_transcription: bool,
}

impl ServerConfig {
    /// Construct a server configuration with face login and transcription
    /// disabled.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            face_match_threshold: None,
            demo_transcription: false,
        }
    }

    /// Apply the feature flags from `settings`.
    #[must_use]
    pub fn with_features(mut self, settings: &ServerSettings) -> Self {
        self.face_match_threshold = settings.face_match_threshold();
        self.demo_transcription = settings.demo_transcription;
        self
    }
}
