use serde::{Deserialize, Serialize};

use crate::domain::{ProductId, UserId};

/// Application-level success marker, distinct from the HTTP status code.
pub const STATUS_SUCCESS: &str = "success";

/// Envelope for `GET /api/<resource>` list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub count: Option<u64>,
    // No `#[serde(default)]` here: on a field mentioning `T` the derive would
    // bound `T: Default`; a missing field is already `None` for an `Option`.
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ListEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Envelope for `POST /api/<resource>` creation responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEnvelope {
    pub status: String,
}

impl HealthEnvelope {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<NewOrderItem>,
}
