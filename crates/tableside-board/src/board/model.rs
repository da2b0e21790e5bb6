/*
[INPUT]:  Order snapshots from the feed, drag-end events from the front-end
[OUTPUT]: Read-through board state, derived columns, notifier calls
[POS]:    Board layer - snapshot holder and drop entry point
[UPDATE]: When snapshot replacement or drop handling changes
*/

use chrono::{DateTime, Utc};
use tableside_adapter::{Order, OrderId};
use tracing::{debug, info};

use super::partition::{visible_columns, Column};
use super::resolver::{evaluate_drop, DragOutcome, Transition};
use crate::drag::DragEnd;
use crate::notifier::StatusChangeNotifier;

/// A full copy of the remote order set as of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    /// Monotonic per feed; higher is newer.
    pub generation: u64,
    pub orders: Vec<Order>,
    pub fetched_at: DateTime<Utc>,
}

impl BoardSnapshot {
    pub fn new(generation: u64, orders: Vec<Order>) -> Self {
        Self {
            generation,
            orders,
            fetched_at: Utc::now(),
        }
    }
}

/// Read-through cache of the order set. Never mutates an order locally.
#[derive(Debug, Clone, Default)]
pub struct Board {
    orders: Vec<Order>,
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl Board {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            generation: 0,
            fetched_at: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    pub fn visible_columns(&self) -> Vec<Column<'_>> {
        visible_columns(&self.orders)
    }

    /// Replace the whole order set with a newer snapshot.
    ///
    /// Returns `false` and keeps the current state when `snapshot` is not newer.
    pub fn apply_snapshot(&mut self, snapshot: BoardSnapshot) -> bool {
        if self.fetched_at.is_some() && snapshot.generation <= self.generation {
            debug!(
                held = self.generation,
                offered = snapshot.generation,
                "ignoring stale snapshot"
            );
            return false;
        }
        self.generation = snapshot.generation;
        self.fetched_at = Some(snapshot.fetched_at);
        self.orders = snapshot.orders;
        true
    }

    /// Resolve a drop and notify at most once.
    pub fn handle_drag_end(
        &self,
        event: &DragEnd,
        notifier: &dyn StatusChangeNotifier,
    ) -> Option<Transition> {
        match evaluate_drop(&self.orders, event) {
            DragOutcome::Transition(transition) => {
                info!(
                    order_id = %transition.order_id,
                    from = %transition.from,
                    to = %transition.to,
                    "status change requested"
                );
                notifier.on_status_change(&transition.order_id, transition.to);
                Some(transition)
            }
            outcome => {
                debug!(active = %event.active, over = ?event.over, %outcome, "drop ignored");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::order;
    use crate::notifier::DeferredNotifier;
    use tableside_adapter::OrderStatus;

    fn sample_board() -> Board {
        Board::new(vec![
            order("A", OrderStatus::Pending),
            order("B", OrderStatus::Preparing),
        ])
    }

    fn drag_end(active: &str, over: Option<&str>) -> DragEnd {
        DragEnd {
            active: OrderId::new(active),
            over: over.map(str::to_string),
        }
    }

    #[test]
    fn drop_on_column_notifies_once() {
        let board = sample_board();
        let notifier = DeferredNotifier::new();

        board.handle_drag_end(&drag_end("A", Some("PREPARING")), &notifier);

        assert_eq!(
            notifier.take(),
            vec![(OrderId::new("A"), OrderStatus::Preparing)]
        );
    }

    #[test]
    fn drop_on_card_notifies_with_card_status() {
        let board = sample_board();
        let notifier = DeferredNotifier::new();

        board.handle_drag_end(&drag_end("A", Some("B")), &notifier);

        assert_eq!(
            notifier.take(),
            vec![(OrderId::new("A"), OrderStatus::Preparing)]
        );
    }

    #[test]
    fn noop_drops_never_notify() {
        let board = sample_board();
        let notifier = DeferredNotifier::new();

        board.handle_drag_end(&drag_end("A", Some("PENDING")), &notifier);
        board.handle_drag_end(&drag_end("ghost", Some("READY")), &notifier);
        board.handle_drag_end(&drag_end("A", None), &notifier);
        board.handle_drag_end(&drag_end("A", Some("table-9")), &notifier);

        assert!(notifier.take().is_empty());
    }

    #[test]
    fn drop_does_not_mutate_local_state() {
        let board = sample_board();
        let notifier = DeferredNotifier::new();

        board.handle_drag_end(&drag_end("A", Some("READY")), &notifier);

        assert_eq!(
            board.find(&OrderId::new("A")).map(|order| order.status),
            Some(OrderStatus::Pending)
        );
    }

    #[test]
    fn newer_snapshot_replaces_and_stale_is_ignored() {
        let mut board = Board::default();

        assert!(board.apply_snapshot(BoardSnapshot::new(2, vec![order("A", OrderStatus::Ready)])));
        assert!(!board.apply_snapshot(BoardSnapshot::new(1, vec![order("A", OrderStatus::Pending)])));
        assert!(!board.apply_snapshot(BoardSnapshot::new(2, Vec::new())));

        assert_eq!(board.generation(), 2);
        assert_eq!(board.orders().len(), 1);
        assert_eq!(board.orders()[0].status, OrderStatus::Ready);

        assert!(board.apply_snapshot(BoardSnapshot::new(3, Vec::new())));
        assert!(board.orders().is_empty());
    }

    #[test]
    fn first_snapshot_is_accepted_even_at_generation_zero() {
        let mut board = Board::default();
        assert!(board.apply_snapshot(BoardSnapshot::new(0, vec![order("A", OrderStatus::Ready)])));
        assert!(board.fetched_at().is_some());
    }
}
