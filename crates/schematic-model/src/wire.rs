//! Serde helpers for the external wire format.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the type's zero value.
///
/// Producers of the wire format emit `null` for empty lists.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
