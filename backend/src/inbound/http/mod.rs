//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers every `/api` handler together with extractor
//! configuration that turns malformed bodies into domain errors.

pub mod auth;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod transcription;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use self::validation::malformed_body_error;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| malformed_body_error(&err).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| malformed_body_error(&err).into())
}

/// Register the API handlers on a scope, typically `/api`.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use bankdesk::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(auth::register)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::face_login)
        .service(auth::logout)
        .service(users::current_user)
        .service(tickets::list_tickets)
        .service(tickets::create_ticket)
        .service(tickets::update_ticket)
        .service(tickets::delete_ticket)
        .service(transcription::transcribe);
}
