//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). Nothing here touches the network.

mod clock;
mod in_memory;

pub use clock::FixtureClock;
pub use in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
