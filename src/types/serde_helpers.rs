//! Serde helpers for the loose field conventions of ICE3X responses.
//!
//! Failure responses may send `"trades": null` and success responses may send
//! `"errorMessage": ""`; these helpers normalize both.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` to also cover a missing field.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use ice3x_api_client::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(default, deserialize_with = "null_as_default::deserialize")]
///     items: Vec<u32>,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"items":null}"#).unwrap();
/// assert!(response.items.is_empty());
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, substituting the default for `null`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Deserialize empty strings as None.
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}
