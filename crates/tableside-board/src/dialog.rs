/*
[INPUT]:  Tagged dialog requests from the board front-end, order detail fetches
[OUTPUT]: The single dialog currently shown, if any
[POS]:    Dialog layer - one dispatcher for every overlay the board opens
[UPDATE]: When adding dialog kinds
*/

use tableside_adapter::{Order, OrderId};
use tracing::debug;

use crate::board::Board;

/// Everything the board can ask to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRequest {
    /// Card click (`onOpenDetails`).
    OrderDetails { order_id: OrderId },
    Help,
    ConfirmSignOut,
}

/// Details view for one order. `loaded` flips once the full record arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    OrderDetails(OrderDetails),
    Help,
    ConfirmSignOut,
}

#[derive(Debug, Default)]
pub struct DialogDispatcher {
    current: Option<Dialog>,
}

impl DialogDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `request`, replacing whatever was open.
    ///
    /// Returns `false` when the request cannot be served, e.g. the order left the board.
    pub fn dispatch(&mut self, request: DialogRequest, board: &Board) -> bool {
        let dialog = match request {
            DialogRequest::OrderDetails { order_id } => match board.find(&order_id) {
                Some(order) => Dialog::OrderDetails(OrderDetails {
                    order: order.clone(),
                    loaded: false,
                }),
                None => {
                    debug!(order_id = %order_id, "details requested for unknown order");
                    return false;
                }
            },
            DialogRequest::Help => Dialog::Help,
            DialogRequest::ConfirmSignOut => Dialog::ConfirmSignOut,
        };
        self.current = Some(dialog);
        true
    }

    pub fn current(&self) -> Option<&Dialog> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn close(&mut self) -> Option<Dialog> {
        self.current.take()
    }

    /// Order id of the open details view, if any.
    pub fn details_order_id(&self) -> Option<&OrderId> {
        match &self.current {
            Some(Dialog::OrderDetails(details)) => Some(&details.order.id),
            _ => None,
        }
    }

    /// Swap in a freshly fetched record. Ignored unless its details view is still open.
    pub fn update_details(&mut self, order: Order) -> bool {
        match &mut self.current {
            Some(Dialog::OrderDetails(details)) if details.order.id == order.id => {
                details.order = order;
                details.loaded = true;
                true
            }
            _ => false,
        }
    }
}
