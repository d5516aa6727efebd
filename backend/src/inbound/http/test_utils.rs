//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;
use crate::domain::ports::{
    MockFaceLoginService, MockLoginService, MockTicketsCommand, MockTicketsQuery,
    MockTranscriber, MockUserProfileQuery, MockUserRegistration,
};

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Mock for every driving port, converted into an [`HttpState`] once the
/// test has set its expectations. Unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub tickets: MockTicketsCommand,
    pub tickets_query: MockTicketsQuery,
    pub registration: MockUserRegistration,
    pub login: MockLoginService,
    pub face_login: MockFaceLoginService,
    pub profile: MockUserProfileQuery,
    pub transcriber: MockTranscriber,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            tickets: Arc::new(self.tickets),
            tickets_query: Arc::new(self.tickets_query),
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            face_login: Arc::new(self.face_login),
            profile: Arc::new(self.profile),
            transcriber: Arc::new(self.transcriber),
        }
    }
}
