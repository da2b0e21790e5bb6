/*
[INPUT]:  Feed states, notifier outcomes, session context, log buffer
[OUTPUT]: BoardApp state for rendering and input handling
[POS]:    TUI app state - cursor, keyboard carry, pointer sensor, hit map
[UPDATE]: When adding board interactions or panels
*/

use std::time::{Duration, Instant};

use tableside_adapter::{Order, OrderId, OrderStatus};
use tracing::{debug, warn};

use crate::board::{Board, Transition};
use crate::dialog::{DialogDispatcher, DialogRequest};
use crate::drag::{DragEnd, Droppable, PointerSensor, Rect as DropRect};
use crate::feed::{FeedError, FeedState};
use crate::logging::LogBufferHandle;
use crate::notifier::{NotifierOutcome, StatusChangeNotifier};
use crate::session::{SessionContext, ToastLevel};

pub(super) const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Board,
    Logs,
}

/// Position within the visible columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Cursor {
    pub(super) column: usize,
    pub(super) row: usize,
}

/// Keyboard drag in progress: a card lifted and hovering over `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Carry {
    pub(super) order_id: OrderId,
    pub(super) target: OrderStatus,
}

/// Drop zones recorded during the last render.
#[derive(Debug, Clone, Default)]
pub(super) struct HitMap {
    pub(super) board_area: Option<DropRect>,
    pub(super) columns: Vec<Droppable>,
    pub(super) cards: Vec<Droppable>,
}

impl HitMap {
    pub(super) fn clear(&mut self) {
        self.board_area = None;
        self.columns.clear();
        self.cards.clear();
    }

    pub(super) fn card_rect(&self, id: &str) -> Option<DropRect> {
        self.cards
            .iter()
            .find(|card| card.id == id)
            .map(|card| card.rect)
    }

    /// Every registered zone, columns first.
    pub(super) fn droppables(&self) -> Vec<Droppable> {
        self.columns.iter().chain(self.cards.iter()).cloned().collect()
    }
}

/// Follow-up work the run loop performs for a handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    None,
    Quit,
    Refresh,
    LoadDetails(OrderId),
    SignOut,
}

pub(super) struct BoardApp {
    pub(super) board: Board,
    pub(super) dialogs: DialogDispatcher,
    pub(super) session: SessionContext,
    pub(super) sensor: PointerSensor,
    pub(super) cursor: Cursor,
    pub(super) carry: Option<Carry>,
    pub(super) pointer: Option<(u16, u16)>,
    pub(super) hit_map: HitMap,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    pub(super) feed_error: Option<FeedError>,
    pub(super) log_buffer: LogBufferHandle,
}

impl BoardApp {
    pub(super) fn new(
        session: SessionContext,
        activation_distance: f32,
        log_buffer: LogBufferHandle,
    ) -> Self {
        Self {
            board: Board::default(),
            dialogs: DialogDispatcher::new(),
            session,
            sensor: PointerSensor::new(activation_distance),
            cursor: Cursor::default(),
            carry: None,
            pointer: None,
            hit_map: HitMap::default(),
            current_tab: Tab::Board,
            status_message: String::from("loading orders"),
            feed_error: None,
            log_buffer,
        }
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Board => Tab::Logs,
            Tab::Logs => Tab::Board,
        };
    }

    pub(super) fn can_edit(&self) -> bool {
        self.session.is_active()
    }

    /// Statuses of the columns currently rendered, left to right.
    pub(super) fn visible_statuses(&self) -> Vec<OrderStatus> {
        self.board
            .visible_columns()
            .iter()
            .map(|column| column.status)
            .collect()
    }

    pub(super) fn selected_order(&self) -> Option<&Order> {
        let columns = self.board.visible_columns();
        let column = columns.get(self.cursor.column)?;
        column.orders.get(self.cursor.row).copied()
    }

    fn locate(&self, id: &OrderId) -> Option<Cursor> {
        self.board
            .visible_columns()
            .iter()
            .enumerate()
            .find_map(|(column, col)| {
                col.orders
                    .iter()
                    .position(|order| &order.id == id)
                    .map(|row| Cursor { column, row })
            })
    }

    fn clamp_cursor(&mut self) {
        let columns = self.board.visible_columns();
        if columns.is_empty() {
            self.cursor = Cursor::default();
            return;
        }
        self.cursor.column = self.cursor.column.min(columns.len() - 1);
        let len = columns[self.cursor.column].len();
        self.cursor.row = self.cursor.row.min(len.saturating_sub(1));
    }

    pub(super) fn move_column(&mut self, delta: isize) {
        if let Some(carry) = self.carry.as_mut() {
            let statuses: Vec<OrderStatus> = self
                .board
                .visible_columns()
                .iter()
                .map(|column| column.status)
                .collect();
            if let Some(index) = statuses.iter().position(|status| *status == carry.target) {
                let next = step(index, delta, statuses.len());
                carry.target = statuses[next];
            }
            return;
        }
        let count = self.board.visible_columns().len();
        if count == 0 {
            return;
        }
        self.cursor.column = step(self.cursor.column, delta, count);
        self.clamp_cursor();
    }

    pub(super) fn move_row(&mut self, delta: isize) {
        if self.carry.is_some() {
            return;
        }
        let len = self
            .board
            .visible_columns()
            .get(self.cursor.column)
            .map(|column| column.len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        self.cursor.row = step(self.cursor.row, delta, len);
    }

    /// Lift the selected card for a keyboard drag.
    pub(super) fn pick_up(&mut self) {
        if !self.can_edit() {
            self.status_message = "signed out; changes are disabled".to_string();
            return;
        }
        let Some(order) = self.selected_order() else {
            return;
        };
        let carry = Carry {
            order_id: order.id.clone(),
            target: order.status,
        };
        self.status_message = format!("moving order {} (Space to drop, Esc to cancel)", carry.order_id);
        self.carry = Some(carry);
    }

    /// Drop the lifted card onto its target column.
    pub(super) fn drop_carried(&mut self, notifier: &dyn StatusChangeNotifier) -> Option<Transition> {
        let carry = self.carry.take()?;
        let event = DragEnd::new(carry.order_id, Some(carry.target.as_str().to_string()));
        self.finish_drag(&event, notifier)
    }

    /// Abort the keyboard drag; it ends outside every target.
    pub(super) fn cancel_carry(&mut self, notifier: &dyn StatusChangeNotifier) {
        if let Some(carry) = self.carry.take() {
            let event = DragEnd::new(carry.order_id, None);
            self.finish_drag(&event, notifier);
        }
    }

    pub(super) fn finish_drag(
        &mut self,
        event: &DragEnd,
        notifier: &dyn StatusChangeNotifier,
    ) -> Option<Transition> {
        self.pointer = None;
        let transition = self.board.handle_drag_end(event, notifier);
        self.status_message = match &transition {
            Some(transition) => format!(
                "order {} -> {} (saving)",
                transition.order_id,
                transition.to.label()
            ),
            None => String::from("no change"),
        };
        transition
    }

    /// Open the details view and ask the run loop to load the full record.
    pub(super) fn open_details(&mut self, order_id: OrderId) -> Command {
        let request = DialogRequest::OrderDetails {
            order_id: order_id.clone(),
        };
        if self.dialogs.dispatch(request, &self.board) {
            Command::LoadDetails(order_id)
        } else {
            Command::None
        }
    }

    pub(super) fn open_help(&mut self) {
        self.dialogs.dispatch(DialogRequest::Help, &self.board);
    }

    pub(super) fn confirm_sign_out(&mut self) {
        self.dialogs
            .dispatch(DialogRequest::ConfirmSignOut, &self.board);
    }

    pub(super) fn apply_feed_state(&mut self, state: &FeedState) {
        if let Some(snapshot) = state.snapshot.as_ref() {
            if snapshot.generation > self.board.generation() || self.board.fetched_at().is_none() {
                let selected = self.selected_order().map(|order| order.id.clone());
                if self.board.apply_snapshot(snapshot.clone()) {
                    if let Some(cursor) = selected.and_then(|id| self.locate(&id)) {
                        self.cursor = cursor;
                    }
                    self.clamp_cursor();
                    self.drop_vanished_carry();
                    if self.feed_error.is_none() && state.last_error.is_none() {
                        self.status_message =
                            format!("{} orders", self.board.orders().len());
                    }
                }
            }
        }

        match state.last_error.as_ref() {
            Some(error) if self.feed_error.as_ref() != Some(error) => {
                self.status_message = format!("refresh failed: {}", error.message);
                if error.auth_error {
                    self.end_session("session expired");
                }
                self.feed_error = Some(error.clone());
            }
            Some(_) => {}
            None => self.feed_error = None,
        }
    }

    fn drop_vanished_carry(&mut self) {
        let vanished = self
            .carry
            .as_ref()
            .is_some_and(|carry| self.board.find(&carry.order_id).is_none());
        if vanished {
            debug!("carried order left the board");
            self.carry = None;
        }
        if let Some(active) = self.sensor.dragging() {
            if self.board.find(active).is_none() {
                self.sensor.cancel();
                self.pointer = None;
            }
        }
    }

    pub(super) fn on_outcome(&mut self, outcome: NotifierOutcome) {
        match outcome {
            NotifierOutcome::Persisted { order } => {
                self.session.toasts_mut().push(
                    ToastLevel::Success,
                    format!("order {} is now {}", order.id, order.status.label()),
                );
            }
            NotifierOutcome::Failed {
                order_id,
                status,
                error,
                auth_error,
            } => {
                let message =
                    format!("could not move order {order_id} to {}: {error}", status.label());
                if auth_error {
                    self.end_session("sign-in rejected");
                }
                // Pushed after teardown so the reason survives `end_session`.
                self.session.toasts_mut().push(ToastLevel::Error, message);
            }
        }
    }

    fn end_session(&mut self, reason: &str) {
        if self.session.is_active() {
            warn!(reason, "ending session after auth failure");
            self.session.end();
            self.carry = None;
            self.sensor.cancel();
            self.session
                .toasts_mut()
                .push(ToastLevel::Error, format!("signed out: {reason}"));
        }
    }

    pub(super) fn on_tick(&mut self, now: Instant) {
        self.session.toasts_mut().expire(now, TOAST_TTL);
    }
}

fn step(index: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1) as isize;
    (index as isize + delta).clamp(0, max) as usize
}
