//! Clipsync Types - wire types shared by the clipboard server and its clients
//!
//! Pure serde data types with no async runtime dependencies.

pub mod entry;
pub mod response;
pub mod user;

pub use entry::*;
pub use response::*;
pub use user::*;

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

/// Returns the field value when it is present and non-empty.
///
/// Absent, `null` and `""` are all treated as missing by the server.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Deserialize a request field that should be a string.
///
/// Any other JSON value (numbers, objects, `null`) becomes `None` rather
/// than rejecting the whole body, so the server reports the field as missing.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(s)) => Some(s),
        Some(Field::Other(_)) | None => None,
    })
}
