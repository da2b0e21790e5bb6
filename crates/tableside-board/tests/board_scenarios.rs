/*
[INPUT]:  Order snapshots and drag-end events
[OUTPUT]: Verification of drop resolution, notification count, and column display
[POS]:    Integration tests - board core behavior through the public API
[UPDATE]: When drop or column display rules change
*/

mod common;

use common::{drop_on, order, two_orders};
use rstest::rstest;
use tableside_adapter::{OrderId, OrderStatus};
use tableside_board::board::{partition, resolve_transition, visible_columns};
use tableside_board::{Board, DeferredNotifier, DragEnd, DragOutcome};

fn notifications(board: &Board, event: &DragEnd) -> Vec<(OrderId, OrderStatus)> {
    let notifier = DeferredNotifier::new();
    board.handle_drag_end(event, &notifier);
    notifier.take()
}

#[test]
fn drag_onto_column_fires_once() {
    let board = Board::new(two_orders());
    assert_eq!(
        notifications(&board, &drop_on("A", "PREPARING")),
        vec![(OrderId::new("A"), OrderStatus::Preparing)]
    );
}

#[test]
fn drag_onto_card_inherits_its_column() {
    let board = Board::new(two_orders());
    assert_eq!(
        notifications(&board, &drop_on("A", "B")),
        vec![(OrderId::new("A"), OrderStatus::Preparing)]
    );
}

#[test]
fn drag_onto_own_column_is_silent() {
    let board = Board::new(two_orders());
    assert!(notifications(&board, &drop_on("A", "PENDING")).is_empty());
}

#[rstest]
#[case("PENDING")]
#[case("PREPARING")]
#[case("READY")]
#[case("SHIPPED")]
#[case("DELIVERED")]
fn unknown_active_never_fires(#[case] column: &str) {
    let board = Board::new(two_orders());
    assert!(notifications(&board, &drop_on("Z", column)).is_empty());
}

#[test]
fn unresolvable_targets_are_silent() {
    let board = Board::new(two_orders());
    assert!(notifications(&board, &drop_on("A", "kitchen-printer")).is_empty());
    assert!(notifications(&board, &DragEnd::new("A", None)).is_empty());
}

#[rstest]
#[case(OrderStatus::Pending)]
#[case(OrderStatus::Preparing)]
#[case(OrderStatus::Ready)]
#[case(OrderStatus::Shipped)]
#[case(OrderStatus::Delivered)]
fn column_key_always_wins(#[case] status: OrderStatus) {
    let orders = vec![order("A", OrderStatus::Ready), order("B", OrderStatus::Shipped)];
    let transition = resolve_transition(&orders, &drop_on("A", status.as_str()));
    assert_eq!(
        transition.map(|t| t.to),
        (status != OrderStatus::Ready).then_some(status)
    );
}

#[test]
fn every_order_lands_in_exactly_one_column() {
    let orders = vec![
        order("1", OrderStatus::Delivered),
        order("2", OrderStatus::Pending),
        order("3", OrderStatus::Delivered),
        order("4", OrderStatus::Ready),
    ];
    let columns = partition(&orders);

    for item in &orders {
        let homes = columns
            .iter()
            .filter(|column| column.orders.iter().any(|o| o.id == item.id))
            .count();
        assert_eq!(homes, 1, "order {} appears in {homes} columns", item.id);
    }
    let delivered: Vec<&str> = columns[OrderStatus::Delivered.index()]
        .orders
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(delivered, vec!["1", "3"]);
}

#[test]
fn incoming_column_hidden_only_while_empty() {
    let without_pending = vec![order("B", OrderStatus::Preparing)];
    let statuses: Vec<OrderStatus> = visible_columns(&without_pending)
        .iter()
        .map(|column| column.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ]
    );

    assert_eq!(visible_columns(&two_orders()).len(), OrderStatus::ALL.len());
    assert_eq!(visible_columns(&[]).len(), OrderStatus::ALL.len() - 1);
}

#[test]
fn raw_payload_flows_through_to_board() {
    let board = Board::new(two_orders());
    let event = DragEnd::try_from_raw(&serde_json::json!({
        "active": { "id": "A" },
        "over": { "id": "READY" }
    }))
    .expect("valid payload");

    assert_eq!(
        notifications(&board, &event),
        vec![(OrderId::new("A"), OrderStatus::Ready)]
    );
    assert!(matches!(
        tableside_board::board::evaluate_drop(board.orders(), &event),
        DragOutcome::Transition(_)
    ));
}
