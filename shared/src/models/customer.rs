//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity, as returned by the customer search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Customer {
    /// `name - email - phone`, with placeholders for missing contact details
    pub fn label(&self) -> String {
        let email = self
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("No email");
        let phone = self
            .phone_number
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("No phone");
        format!("{} - {} - {}", self.name, email, phone)
    }
}

/// One entry of the customer type-ahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOption {
    pub label: String,
    /// Customer id
    pub value: String,
}

impl From<&Customer> for CustomerOption {
    fn from(customer: &Customer) -> Self {
        Self {
            label: customer.label(),
            value: customer.id.clone(),
        }
    }
}
