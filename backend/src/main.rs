//! bankdesk entry-point: loads settings, opens the store lazily and serves
//! the REST API.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::cookie::SameSite;
use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use bankdesk::inbound::http::health::HealthState;
use bankdesk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use bankdesk::outbound::persistence::{ConnectionManager, MongoConnector};
use server::{ServerConfig, ServerSettings, StoreSettings, create_server};

fn settings_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("failed to load settings: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = [OsString::from("bankdesk")];
    let server_settings = ServerSettings::load_from_iter(args.clone()).map_err(settings_error)?;
    let store_settings = StoreSettings::load_from_iter(args).map_err(settings_error)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        SameSite::Lax,
        server_settings.bind_addr()?,
    )
    .with_features(&server_settings);

    let connection = Arc::new(ConnectionManager::new(MongoConnector::new(
        store_settings.mongo_config(),
    )));
    if let Err(error) = connection.connect().await {
        warn!(%error, "store unavailable at startup; requests will retry");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config, Arc::clone(&connection))?;
    let outcome = server.await;

    health_state.mark_draining();
    connection.shutdown().await;
    outcome
}
