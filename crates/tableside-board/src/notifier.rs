/*
[INPUT]:  Resolved status changes (order id, new status)
[OUTPUT]: Fire-and-forget persistence through the order API, outcome reports
[POS]:    Side-effect seam between the board and the order API
[UPDATE]: When persistence or outcome reporting changes
*/

use std::sync::{Arc, Mutex};

use tableside_adapter::{Order, OrderApi, OrderId, OrderStatus};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Receives the single notification a resolved drop emits.
///
/// Implementations must return without waiting on persistence.
pub trait StatusChangeNotifier: Send + Sync {
    fn on_status_change(&self, order_id: &OrderId, status: OrderStatus);
}

/// Result of one persistence attempt, reported after the fact.
#[derive(Debug, Clone)]
pub enum NotifierOutcome {
    Persisted {
        order: Order,
    },
    Failed {
        order_id: OrderId,
        status: OrderStatus,
        error: String,
        auth_error: bool,
    },
}

/// Persists each change on its own task and reports the outcome on a channel.
pub struct ApiNotifier {
    api: Arc<dyn OrderApi>,
    outcomes: mpsc::UnboundedSender<NotifierOutcome>,
}

impl ApiNotifier {
    pub fn new(api: Arc<dyn OrderApi>) -> (Self, mpsc::UnboundedReceiver<NotifierOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (Self { api, outcomes }, rx)
    }
}

impl StatusChangeNotifier for ApiNotifier {
    fn on_status_change(&self, order_id: &OrderId, status: OrderStatus) {
        let order_id = order_id.clone();
        let outcomes = self.outcomes.clone();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(order_id = %order_id, "no Tokio runtime; status change dropped");
            let _ = outcomes.send(NotifierOutcome::Failed {
                order_id,
                status,
                error: "no async runtime available".to_string(),
                auth_error: false,
            });
            return;
        };

        let api = self.api.clone();
        handle.spawn(async move {
            let outcome = match api.change_status(&order_id, status).await {
                Ok(order) => {
                    info!(order_id = %order.id, status = %order.status, "status change persisted");
                    NotifierOutcome::Persisted { order }
                }
                Err(err) => {
                    warn!(order_id = %order_id, status = %status, error = %err, "status change failed");
                    NotifierOutcome::Failed {
                        order_id,
                        status,
                        error: err.to_string(),
                        auth_error: err.is_auth_error(),
                    }
                }
            };
            let _ = outcomes.send(outcome);
        });
    }
}

/// Buffers requested changes for the caller to persist later.
#[derive(Debug, Default)]
pub struct DeferredNotifier {
    pending: Mutex<Vec<(OrderId, OrderStatus)>>,
}

impl DeferredNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain buffered changes in request order.
    pub fn take(&self) -> Vec<(OrderId, OrderStatus)> {
        let mut guard = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl StatusChangeNotifier for DeferredNotifier {
    fn on_status_change(&self, order_id: &OrderId, status: OrderStatus) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((order_id.clone(), status));
    }
}
