//! API Response types
//!
//! Envelopes used by the restaurant service.
//!
//! List endpoints answer:
//! ```json
//! { "items": [ ... ] }
//! ```
//! Single-record endpoints answer:
//! ```json
//! { "data": { ... } }
//! ```

use serde::{Deserialize, Serialize};

/// List envelope: `{ "items": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    /// Missing or null `items` decode as an empty list
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Single record envelope: `{ "data": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ItemResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
