/*
[INPUT]:  Test scenarios needing orders, boards, and mock API servers
[OUTPUT]: Shared fixtures for tableside-board integration tests
[POS]:    Test infrastructure - shared across integration test files
[UPDATE]: When adding new fixtures
*/

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tableside_adapter::{Order, OrderId, OrderStatus};
use tableside_board::DragEnd;

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        status,
        table: Some("7".to_string()),
        item_count: 3,
        total: Decimal::new(4250, 2),
        created_at: Utc
            .with_ymd_and_hms(2026, 3, 1, 19, 30, 0)
            .single()
            .expect("valid timestamp"),
        customer_name: None,
        notes: None,
        items: Vec::new(),
    }
}

/// `[A: PENDING, B: PREPARING]`
pub fn two_orders() -> Vec<Order> {
    vec![
        order("A", OrderStatus::Pending),
        order("B", OrderStatus::Preparing),
    ]
}

pub fn drop_on(active: &str, over: &str) -> DragEnd {
    DragEnd::new(active, Some(over.to_string()))
}

/// Order JSON as the API returns it
pub fn order_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "table": "7",
        "item_count": 3,
        "total": "42.50",
        "created_at": "2026-03-01T19:30:00Z"
    })
}
