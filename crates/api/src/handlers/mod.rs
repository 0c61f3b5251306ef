//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input at the boundary, delegate to the repositories in
//! `fds_db` and the pure computations in `fds_core`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod contributions;
pub mod dashboard;
pub mod lookup;
pub mod members;
pub mod reports;

use chrono::{NaiveDate, Utc};

/// Today's date in UTC. Reports read the clock on every request.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
