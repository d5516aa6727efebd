//! Shared app construction for integration tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};

use bankdesk::Trace;
use bankdesk::domain::ports::DisabledTranscriber;
use bankdesk::domain::{AccountService, TicketService};
use bankdesk::inbound::http::configure;
use bankdesk::inbound::http::session_config::SESSION_COOKIE_NAME;
use bankdesk::inbound::http::state::HttpState;
use bankdesk::test_support::{FixtureClock, InMemoryTicketRepository, InMemoryUserRepository};

/// Clock starting at a fixed instant, shared with the services under test.
pub fn fixture_clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp"),
    ))
}

/// In-memory backed API mounted under `/api` with cookie sessions.
pub fn test_app(
    clock: Arc<FixtureClock>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let tickets = TicketService::new(Arc::new(InMemoryTicketRepository::new()), clock.clone());
    let accounts = AccountService::new(Arc::new(InMemoryUserRepository::new()), clock);
    let state = HttpState::from_services(
        Arc::new(tickets),
        Arc::new(accounts),
        Arc::new(DisabledTranscriber),
    );
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api").wrap(session).configure(configure))
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}
