//! Floor Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Floor entity (a named seating area of a branch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: i64,
    pub name: String,
    pub floor_number: i32,
    pub capacity: i32,
    #[serde(default)]
    pub layout_url: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    #[serde(default)]
    pub extension_data: Option<Value>,
}

/// Values captured by the create/edit floor form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorForm {
    pub name: String,
    pub floor_number: i32,
    pub capacity: i32,
}

impl From<&Floor> for FloorForm {
    fn from(floor: &Floor) -> Self {
        Self {
            name: floor.name.clone(),
            floor_number: floor.floor_number,
            capacity: floor.capacity,
        }
    }
}

/// Full floor record sent on create and update
///
/// There is no partial update: the whole form plus the branch id always goes out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPayload {
    #[serde(flatten)]
    pub form: FloorForm,
    pub restaurant_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_data: Option<Option<Value>>,
}

impl FloorPayload {
    /// Create payload: layout and extension data are explicitly null
    pub fn create(form: FloorForm, restaurant_id: i64) -> Self {
        Self {
            form,
            restaurant_id,
            layout_url: Some(None),
            extension_data: Some(None),
        }
    }

    /// Update payload: form values plus the active branch id
    pub fn update(form: FloorForm, restaurant_id: i64) -> Self {
        Self {
            form,
            restaurant_id,
            layout_url: None,
            extension_data: None,
        }
    }
}
