//! Serde helper for keys that must be present but may hold `null`.
//!
//! serde treats a missing `Option<T>` field as `None`. Routing the field
//! through `deserialize_with` removes that fallback, so an absent key fails
//! with `missing field` while an explicit `null` still yields `None`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
