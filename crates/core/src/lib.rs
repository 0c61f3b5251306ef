//! Domain logic for the family deposit scheme.
//!
//! Everything in this crate is pure: no I/O, no database, no clock. Callers
//! pass in snapshots and "today" explicitly so results are deterministic.

pub mod account;
pub mod error;
pub mod ledger;
pub mod locale;
pub mod overdue;
pub mod period;
pub mod profile;
pub mod statement;
pub mod types;
