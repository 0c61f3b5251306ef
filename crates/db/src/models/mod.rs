//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches; nullable
//!   columns use `Option<Option<T>>` via [`nullable`] so a patch can clear them

pub mod admin;
pub mod contribution;
pub mod member;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some`, keeping an explicit `null` as
/// `Some(None)`. Pair with `#[serde(default)]` so an absent field is `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
