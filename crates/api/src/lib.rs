//! Long-polling job service, HTTP layer.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! background tasks) so integration tests and the binary entrypoint can
//! both access them. The job registry itself lives in `longpoll_core`.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
