//! Shared response envelopes.
//!
//! Writes answer with `{ "message": ..., "<entity>": row }`; plain
//! acknowledgements with `{ "message": ... }`. Lists are bare arrays.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// `{ "message": ..., "<key>": item }` envelope for create/update responses.
///
/// # Example
///
/// ```ignore
/// Ok((StatusCode::CREATED, Json(Saved::new("Branch created successfully", "branch", branch))))
/// ```
#[derive(Debug)]
pub struct Saved<T> {
    pub message: &'static str,
    pub key: &'static str,
    pub item: T,
}

impl<T> Saved<T> {
    pub fn new(message: &'static str, key: &'static str, item: T) -> Self {
        Self { message, key, item }
    }
}

impl<T: Serialize> Serialize for Saved<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("message", self.message)?;
        map.serialize_entry(self.key, &self.item)?;
        map.end()
    }
}

/// `{ "message": ... }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
