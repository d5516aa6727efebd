//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FaceLoginService, LoginService, TicketRepository, TicketsCommand, TicketsQuery, Transcriber,
    UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::{AccountService, TicketService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tickets: Arc<dyn TicketsCommand>,
    pub tickets_query: Arc<dyn TicketsQuery>,
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub face_login: Arc<dyn FaceLoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl HttpState {
    /// Wire every port from the two domain services.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bankdesk::domain::ports::DisabledTranscriber;
    /// use bankdesk::domain::{AccountService, TicketService};
    /// use bankdesk::inbound::http::state::HttpState;
    /// use bankdesk::test_support::{InMemoryTicketRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let tickets = TicketService::new(
    ///     Arc::new(InMemoryTicketRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let accounts = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_services(
    ///     Arc::new(tickets),
    ///     Arc::new(accounts),
    ///     Arc::new(DisabledTranscriber),
    /// );
    /// let _query = state.tickets_query.clone();
    /// ```
    pub fn from_services<T, U>(
        tickets: Arc<TicketService<T>>,
        accounts: Arc<AccountService<U>>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self
    where
        T: TicketRepository + 'static,
        U: UserRepository + 'static,
    {
        Self {
            tickets: tickets.clone(),
            tickets_query: tickets,
            registration: accounts.clone(),
            login: accounts.clone(),
            face_login: accounts.clone(),
            profile: accounts,
            transcriber,
        }
    }
}
