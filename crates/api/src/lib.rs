//! Out-of-service bed API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! availability API client) so integration tests and the binary entrypoint
//! can both access them.

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod upstream;
