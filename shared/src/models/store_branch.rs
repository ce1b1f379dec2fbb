//! Store Branch Model

use serde::{Deserialize, Serialize};

/// Store branch entity (one physical restaurant location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreBranch {
    pub id: i64,
    pub name: String,
}

impl StoreBranch {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The "nothing selected" sentinel: `{ id: 0, name: "N/A" }`
    pub fn none() -> Self {
        Self::new(0, "N/A")
    }

    pub fn is_selected(&self) -> bool {
        self.id != 0
    }
}

impl Default for StoreBranch {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unselected_sentinel() {
        let branch = StoreBranch::default();
        assert_eq!(branch.id, 0);
        assert_eq!(branch.name, "N/A");
        assert!(!branch.is_selected());
        assert!(StoreBranch::new(5, "Downtown").is_selected());
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(StoreBranch::new(7, "Riverside")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "name": "Riverside" }));
    }
}
