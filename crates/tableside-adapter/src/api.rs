/*
[INPUT]:  Order listing and status-change calls from board collaborators
[OUTPUT]: Abstract order API capability plus an in-memory mock
[POS]:    Seam between the board core and the HTTP client
[UPDATE]: When the board needs another order-management capability
*/

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::http::{Result, TablesideClient, TablesideError};
use crate::types::{Order, OrderId, OrderStatus};

/// Order-management capability the board depends on.
///
/// The trait is async so implementations can talk to the network.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetch the current order snapshot
    async fn fetch_orders(&self) -> Result<Vec<Order>>;

    /// Fetch one order for the detail view
    async fn fetch_order(&self, id: &OrderId) -> Result<Order>;

    /// Persist a status change
    async fn change_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order>;
}

#[async_trait]
impl OrderApi for TablesideClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        Ok(self.list_orders(None).await?.orders)
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order> {
        self.get_order(id).await
    }

    async fn change_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        self.update_order_status(id, status).await
    }
}

/// In-memory order API for testing and offline demos
#[derive(Debug, Clone, Default)]
pub struct MockOrderApi {
    orders: Arc<Mutex<Vec<Order>>>,
    changes: Arc<Mutex<Vec<(OrderId, OrderStatus)>>>,
    fail_changes: bool,
}

impl MockOrderApi {
    /// Create a mock seeded with orders
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            changes: Arc::new(Mutex::new(Vec::new())),
            fail_changes: false,
        }
    }

    /// Make every status change fail with an API error
    pub fn failing(mut self) -> Self {
        self.fail_changes = true;
        self
    }

    /// Status changes received so far, in call order
    pub fn changes(&self) -> Vec<(OrderId, OrderStatus)> {
        lock(&self.changes).clone()
    }
}

#[async_trait]
impl OrderApi for MockOrderApi {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        Ok(lock(&self.orders).clone())
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order> {
        lock(&self.orders)
            .iter()
            .find(|order| &order.id == id)
            .cloned()
            .ok_or_else(|| TablesideError::NotFound {
                resource: format!("/api/orders/{id}"),
            })
    }

    async fn change_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        lock(&self.changes).push((id.clone(), status));
        if self.fail_changes {
            return Err(TablesideError::Api {
                code: 500,
                message: "mock failure".to_string(),
            });
        }

        let mut orders = lock(&self.orders);
        let order = orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| TablesideError::NotFound {
                resource: format!("/api/orders/{id}"),
            })?;
        order.status = status;
        Ok(order.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
