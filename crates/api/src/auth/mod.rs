//! Admin authentication: [`password`] hashing and signed access [`token`]s.

pub mod password;
pub mod token;
