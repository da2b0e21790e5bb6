/*
[INPUT]:  Order snapshot slice
[OUTPUT]: Per-status columns in board order
[POS]:    Board layer - pure projection for rendering
[UPDATE]: When column display rules change
*/

use tableside_adapter::{Order, OrderStatus};

/// One board column. Always derived from a snapshot, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub status: OrderStatus,
    pub orders: Vec<&'a Order>,
}

impl<'a> Column<'a> {
    /// Column identifier used as a drop target.
    pub fn id(&self) -> &'static str {
        self.status.as_str()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Bucket orders by status, one column per status in column order.
///
/// Each bucket is a stable filter of `orders`.
pub fn partition(orders: &[Order]) -> Vec<Column<'_>> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| Column {
            status,
            orders: orders.iter().filter(|order| order.status == status).collect(),
        })
        .collect()
}

/// Columns as rendered: the incoming column is dropped while empty.
pub fn visible_columns(orders: &[Order]) -> Vec<Column<'_>> {
    partition(orders)
        .into_iter()
        .filter(|column| !(column.status == OrderStatus::INITIAL && column.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::order;

    #[test]
    fn buckets_preserve_source_order() {
        let orders = vec![
            order("a", OrderStatus::Ready),
            order("b", OrderStatus::Pending),
            order("c", OrderStatus::Ready),
            order("d", OrderStatus::Delivered),
            order("e", OrderStatus::Ready),
        ];

        let columns = partition(&orders);
        assert_eq!(columns.len(), OrderStatus::ALL.len());

        let ready: Vec<&str> = columns[OrderStatus::Ready.index()]
            .orders
            .iter()
            .map(|order| order.id.as_str())
            .collect();
        assert_eq!(ready, vec!["a", "c", "e"]);
    }

    #[test]
    fn every_order_lands_in_exactly_one_column() {
        let orders: Vec<Order> = OrderStatus::ALL
            .iter()
            .cycle()
            .take(12)
            .enumerate()
            .map(|(idx, status)| order(&format!("o-{idx}"), *status))
            .collect();

        let columns = partition(&orders);
        let total: usize = columns.iter().map(Column::len).sum();
        assert_eq!(total, orders.len());
        for column in &columns {
            assert!(column.orders.iter().all(|order| order.status == column.status));
        }
    }

    #[test]
    fn empty_incoming_column_is_hidden() {
        let orders = vec![order("b", OrderStatus::Preparing)];

        let visible = visible_columns(&orders);
        let statuses: Vec<OrderStatus> = visible.iter().map(|column| column.status).collect();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
            ]
        );
        assert!(visible.iter().skip(1).all(Column::is_empty));
    }

    #[test]
    fn non_empty_incoming_column_is_shown_first() {
        let orders = vec![order("a", OrderStatus::Pending)];
        let visible = visible_columns(&orders);
        assert_eq!(visible.len(), OrderStatus::ALL.len());
        assert_eq!(visible[0].id(), "PENDING");
    }

    #[test]
    fn empty_snapshot_shows_all_but_incoming() {
        let visible = visible_columns(&[]);
        assert_eq!(visible.len(), OrderStatus::ALL.len() - 1);
        assert!(visible.iter().all(|column| column.status != OrderStatus::INITIAL));
    }
}
