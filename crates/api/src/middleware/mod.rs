//! Request extractors. [`auth::AuthAdmin`] authenticates admin routes.

pub mod auth;
