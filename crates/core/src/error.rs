use crate::types::DbId;

/// Failures the ledger can report, independent of transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record looked up by its database id does not exist.
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// A record looked up by a natural key (account number, username) does
    /// not exist.
    #[error("{entity} '{key}' does not exist")]
    NotFoundBy { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write would break a uniqueness rule, such as a second
    /// contribution for the same member and month.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
