//! Builders for the HTTP state from repositories sharing one store
//! connection.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use bankdesk::domain::ports::{DisabledTranscriber, Transcriber};
use bankdesk::domain::{AccountService, TicketService};
use bankdesk::inbound::http::state::HttpState;
use bankdesk::outbound::persistence::{
    ConnectionManager, MongoConnector, MongoTicketRepository, MongoUserRepository,
};
use bankdesk::outbound::transcription::DemoTranscriber;

use super::ServerConfig;

fn build_transcriber(config: &ServerConfig) -> Arc<dyn Transcriber> {
    if config.demo_transcription {
        Arc::new(DemoTranscriber)
    } else {
        Arc::new(DisabledTranscriber)
    }
}

/// Wire the domain services over the shared connection.
pub(super) fn build_http_state(
    config: &ServerConfig,
    connection: Arc<ConnectionManager<MongoConnector>>,
) -> web::Data<HttpState> {
    let tickets = TicketService::new(
        Arc::new(MongoTicketRepository::new(Arc::clone(&connection))),
        Arc::new(DefaultClock),
    );
    let accounts = AccountService::new(
        Arc::new(MongoUserRepository::new(connection)),
        Arc::new(DefaultClock),
    );
    let accounts = match config.face_match_threshold {
        Some(threshold) => {
            tracing::info!(threshold, "face login enabled");
            accounts.with_face_matching(threshold)
        }
        None => accounts,
    };

    web::Data::new(HttpState::from_services(
        Arc::new(tickets),
        Arc::new(accounts),
        build_transcriber(config),
    ))
}
