/*
[INPUT]:  Order-management API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for orders and staff users
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderStatus, UserRole};

/// Opaque order identifier assigned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Table reference; `None` for take-away and delivery orders.
    #[serde(default, alias = "table_number", skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default)]
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn order_deserializes_with_optional_fields_missing() {
        let raw = r#"{
            "id": "ord-17",
            "status": "PREPARING",
            "table_number": "T4",
            "item_count": 3,
            "total": "42.50",
            "created_at": "2026-03-01T12:30:00Z"
        }"#;

        let order: Order = serde_json::from_str(raw).expect("deserialize order");
        assert_eq!(order.id, OrderId::new("ord-17"));
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.table.as_deref(), Some("T4"));
        assert_eq!(order.total, Decimal::from_str("42.50").expect("decimal"));
        assert!(order.items.is_empty());
        assert!(order.customer_name.is_none());
    }
}
