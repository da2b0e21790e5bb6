/*
[INPUT]:  Order-management API schema (status and role vocabularies)
[OUTPUT]: Closed Rust enums with serialization support
[POS]:    Data layer - enum definitions shared by API and board
[UPDATE]: When the API adds a status or role
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a restaurant order.
///
/// Declaration order is board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Every status, in column order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// Status of freshly placed orders ("incoming work").
    pub const INITIAL: OrderStatus = OrderStatus::Pending;

    /// Wire name, also used as the board column identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    /// Human label for column headers.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Recognize a column identifier. Exact, case-sensitive match on the wire name.
    pub fn from_column_id(id: &str) -> Option<OrderStatus> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == id)
    }

    /// Position of this status in column order.
    pub fn index(&self) -> usize {
        OrderStatus::ALL
            .iter()
            .position(|status| status == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderStatus::from_column_id(&value.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown order status: {value}"))
    }
}

/// Role of the signed-in staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Cashier,
    Waiter,
    Kitchen,
    #[serde(other)]
    Unknown,
}
