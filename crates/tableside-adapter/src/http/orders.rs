/*
[INPUT]:  Order ids, status filters, and the session bearer token
[OUTPUT]: Order snapshots and persisted status changes
[POS]:    HTTP layer - order endpoints (require session)
[UPDATE]: When adding order endpoints or changing query parameters
*/

use reqwest::Method;
use tracing::info;

use crate::http::{Result, TablesideClient};
use crate::types::{Order, OrderId, OrderList, OrderStatus, UpdateOrderStatusRequest};

impl TablesideClient {
    /// List orders, optionally filtered by status
    ///
    /// GET /api/orders?status={status}
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<OrderList> {
        let mut builder = self.authed_request(Method::GET, &["api", "orders"])?;
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        self.send_json(builder).await
    }

    /// Fetch a single order with its line items
    ///
    /// GET /api/orders/{id}
    pub async fn get_order(&self, id: &OrderId) -> Result<Order> {
        let builder = self.authed_request(Method::GET, &["api", "orders", id.as_str()])?;
        self.send_json(builder).await
    }

    /// Persist a status change and return the updated order
    ///
    /// PATCH /api/orders/{id}/status
    pub async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let body = UpdateOrderStatusRequest { status };
        let builder = self
            .authed_request(Method::PATCH, &["api", "orders", id.as_str(), "status"])?
            .json(&body);
        let order: Order = self.send_json(builder).await?;
        info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }
}
