/*
[INPUT]:  Crossterm key and mouse events, status change notifier
[OUTPUT]: BoardApp updates and follow-up commands for the run loop
[POS]:    TUI event routing - keyboard carry and pointer drag sources
[UPDATE]: When changing keybindings or gesture handling
*/

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use super::app::{BoardApp, Command, Tab};
use crate::dialog::Dialog;
use crate::drag::{Point, Rect as DropRect, SensorEvent, closest_corners};
use crate::notifier::StatusChangeNotifier;

/// Fallback size of a dragged card whose rect was not rendered.
const DRAG_CARD_WIDTH: f32 = 20.0;
const DRAG_CARD_HEIGHT: f32 = 4.0;

pub(super) fn handle_key_event(
    app: &mut BoardApp,
    key: KeyCode,
    notifier: &dyn StatusChangeNotifier,
) -> Command {
    if app.dialogs.is_open() {
        return handle_dialog_key(app, key);
    }

    if app.carry.is_some() {
        match key {
            KeyCode::Left | KeyCode::Char('h') => app.move_column(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_column(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                app.drop_carried(notifier);
            }
            KeyCode::Esc => app.cancel_carry(notifier),
            _ => {}
        }
        return Command::None;
    }

    match key {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('r') => {
            app.status_message = String::from("refreshing");
            Command::Refresh
        }
        KeyCode::Tab => {
            app.next_tab();
            Command::None
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::Board);
            Command::None
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Logs);
            Command::None
        }
        KeyCode::Char('?') => {
            app.open_help();
            Command::None
        }
        KeyCode::Char('o') => {
            app.confirm_sign_out();
            Command::None
        }
        _ if app.current_tab != Tab::Board => Command::None,
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_column(-1);
            Command::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_column(1);
            Command::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_row(-1);
            Command::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_row(1);
            Command::None
        }
        KeyCode::Char(' ') => {
            app.pick_up();
            Command::None
        }
        KeyCode::Enter => match app.selected_order() {
            Some(order) => {
                let order_id = order.id.clone();
                app.open_details(order_id)
            }
            None => Command::None,
        },
        _ => Command::None,
    }
}

fn handle_dialog_key(app: &mut BoardApp, key: KeyCode) -> Command {
    let confirming = matches!(app.dialogs.current(), Some(Dialog::ConfirmSignOut));
    match key {
        KeyCode::Char('y') | KeyCode::Enter if confirming => {
            app.dialogs.close();
            Command::SignOut
        }
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('n') => {
            app.dialogs.close();
            Command::None
        }
        _ => Command::None,
    }
}

pub(super) fn handle_mouse_event(
    app: &mut BoardApp,
    mouse: MouseEvent,
    notifier: &dyn StatusChangeNotifier,
) -> Command {
    if app.dialogs.is_open() || app.current_tab != Tab::Board || app.carry.is_some() {
        return Command::None;
    }
    let point = Point::new(f32::from(mouse.column), f32::from(mouse.row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(card) = app.hit_map.cards.iter().find(|card| card.rect.contains(point)) {
                let order_id = card.id.as_str().into();
                app.sensor.press(order_id, point);
            }
            Command::None
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(SensorEvent::DragStart { active }) = app.sensor.moved(point) {
                if app.can_edit() {
                    app.status_message = format!("dragging order {active}");
                } else {
                    app.sensor.cancel();
                    app.status_message = "signed out; changes are disabled".to_string();
                    return Command::None;
                }
            }
            if app.sensor.dragging().is_some() {
                app.pointer = Some((mouse.column, mouse.row));
            }
            Command::None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let over = drop_target(app, point);
            match app.sensor.release(over) {
                Some(SensorEvent::Click { active }) => app.open_details(active),
                Some(SensorEvent::DragEnd(event)) => {
                    app.finish_drag(&event, notifier);
                    Command::None
                }
                _ => Command::None,
            }
        }
        _ => Command::None,
    }
}

/// Id of the zone a card released at `point` lands on.
///
/// Released outside the board means no target.
fn drop_target(app: &BoardApp, point: Point) -> Option<String> {
    let active = app.sensor.dragging()?;
    let inside = app
        .hit_map
        .board_area
        .is_some_and(|area| area.contains(point));
    if !inside {
        return None;
    }
    let dragged = app
        .hit_map
        .card_rect(active.as_str())
        .unwrap_or_else(|| DropRect::new(0.0, 0.0, DRAG_CARD_WIDTH, DRAG_CARD_HEIGHT))
        .centered_on(point);
    let droppables = app.hit_map.droppables();
    closest_corners(&dragged, &droppables).map(|droppable| droppable.id.clone())
}
