/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::{Order, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    pub user: User,
}

fn default_expires_in() -> u64 {
    8 * 60 * 60
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, alias = "error")]
    pub message: String,
}
