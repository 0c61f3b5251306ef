//! Family deposit scheme API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes)
//! so integration tests, the server binary and the management CLI can all
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
