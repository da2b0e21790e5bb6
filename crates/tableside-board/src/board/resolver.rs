/*
[INPUT]:  Order snapshot and a validated drag-end event
[OUTPUT]: Status-change intent or a classified no-op
[POS]:    Board layer - drag gesture to status transition mapping
[UPDATE]: When drop-target rules change
*/

use std::fmt;

use tableside_adapter::{Order, OrderId, OrderStatus};

use crate::drag::DragEnd;

/// A status change the board wants persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Result of evaluating one drop. Only `Transition` has side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Transition(Transition),
    /// Dragged order is no longer in the snapshot.
    UnknownActive,
    /// Dropped outside every target.
    NoTarget,
    /// Target is neither a column nor a known order.
    UnknownTarget,
    /// Dropped back into the order's current column.
    SameStatus,
}

impl fmt::Display for DragOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragOutcome::Transition(t) => write!(f, "{} {} -> {}", t.order_id, t.from, t.to),
            DragOutcome::UnknownActive => f.write_str("unknown active order"),
            DragOutcome::NoTarget => f.write_str("dropped outside"),
            DragOutcome::UnknownTarget => f.write_str("unknown drop target"),
            DragOutcome::SameStatus => f.write_str("same column"),
        }
    }
}

/// Status a drop onto `over` selects.
///
/// Column ids win over order ids. Dropping onto a card selects that card's column.
pub fn destination_status(orders: &[Order], over: &str) -> Option<OrderStatus> {
    if let Some(status) = OrderStatus::from_column_id(over) {
        return Some(status);
    }
    orders
        .iter()
        .find(|order| order.id.as_str() == over)
        .map(|order| order.status)
}

pub fn evaluate_drop(orders: &[Order], event: &DragEnd) -> DragOutcome {
    let Some(active) = orders.iter().find(|order| order.id == event.active) else {
        return DragOutcome::UnknownActive;
    };
    let Some(over) = event.over.as_deref() else {
        return DragOutcome::NoTarget;
    };
    let Some(to) = destination_status(orders, over) else {
        return DragOutcome::UnknownTarget;
    };
    if to == active.status {
        return DragOutcome::SameStatus;
    }

    DragOutcome::Transition(Transition {
        order_id: active.id.clone(),
        from: active.status,
        to,
    })
}

pub fn resolve_transition(orders: &[Order], event: &DragEnd) -> Option<Transition> {
    match evaluate_drop(orders, event) {
        DragOutcome::Transition(transition) => Some(transition),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::order;
    use rstest::rstest;

    fn sample() -> Vec<Order> {
        vec![
            order("A", OrderStatus::Pending),
            order("B", OrderStatus::Preparing),
        ]
    }

    fn drag_end(active: &str, over: Option<&str>) -> DragEnd {
        DragEnd {
            active: OrderId::new(active),
            over: over.map(str::to_string),
        }
    }

    #[rstest]
    #[case("PENDING", OrderStatus::Pending)]
    #[case("PREPARING", OrderStatus::Preparing)]
    #[case("READY", OrderStatus::Ready)]
    #[case("SHIPPED", OrderStatus::Shipped)]
    #[case("DELIVERED", OrderStatus::Delivered)]
    fn column_target_is_destination(#[case] column: &str, #[case] expected: OrderStatus) {
        assert_eq!(destination_status(&sample(), column), Some(expected));
    }

    #[test]
    fn card_target_inherits_card_status() {
        let transition = resolve_transition(&sample(), &drag_end("A", Some("B"))).expect("transition");
        assert_eq!(transition.order_id, OrderId::new("A"));
        assert_eq!(transition.from, OrderStatus::Pending);
        assert_eq!(transition.to, OrderStatus::Preparing);
    }

    #[test]
    fn column_target_produces_transition() {
        let transition =
            resolve_transition(&sample(), &drag_end("A", Some("PREPARING"))).expect("transition");
        assert_eq!(transition.to, OrderStatus::Preparing);
    }

    #[test]
    fn same_column_is_noop() {
        assert_eq!(
            evaluate_drop(&sample(), &drag_end("A", Some("PENDING"))),
            DragOutcome::SameStatus
        );
        assert_eq!(
            evaluate_drop(&sample(), &drag_end("A", Some("A"))),
            DragOutcome::SameStatus
        );
    }

    #[test]
    fn unknown_active_is_noop() {
        assert_eq!(
            evaluate_drop(&sample(), &drag_end("Z", Some("READY"))),
            DragOutcome::UnknownActive
        );
    }

    #[test]
    fn missing_or_unknown_target_is_noop() {
        assert_eq!(evaluate_drop(&sample(), &drag_end("A", None)), DragOutcome::NoTarget);
        assert_eq!(
            evaluate_drop(&sample(), &drag_end("A", Some("nowhere"))),
            DragOutcome::UnknownTarget
        );
    }

    #[test]
    fn column_id_wins_over_colliding_order_id() {
        let orders = vec![
            order("A", OrderStatus::Pending),
            order("READY", OrderStatus::Delivered),
        ];
        let transition = resolve_transition(&orders, &drag_end("A", Some("READY"))).expect("transition");
        assert_eq!(transition.to, OrderStatus::Ready);
    }
}
