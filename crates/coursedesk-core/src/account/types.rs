//! Account response types.

use serde::{Deserialize, Serialize};

/// The authenticated-user projection held by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserProfile {
    /// Name and surname joined for display.
    pub fn display_name(&self) -> String {
        match (self.name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.name, self.last_name),
            (false, true) => self.name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => self.email.clone(),
        }
    }
}

/// A single line of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub item_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
}

/// A completed purchase from the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub purchase_id: i64,
    /// Timestamp as sent by the backend; formatting is left to the caller.
    pub purchase_date: String,
    pub price: f64,
    #[serde(default)]
    pub items: Vec<PurchaseItem>,
}

/// `{ "message": ... }` body returned by the password-reset endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: String,
}
