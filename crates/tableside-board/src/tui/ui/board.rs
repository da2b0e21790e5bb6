/*
[INPUT]:  BoardApp board columns, cursor, carry, pointer position
[OUTPUT]: Kanban columns and order cards; records the hit map for pointer drops
[POS]:    TUI UI board panel rendering
[UPDATE]: When changing card contents or column layout
*/

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tableside_adapter::Order;
use unicode_width::UnicodeWidthStr;

use super::{border_style, status_color};
use crate::drag::{Droppable, Rect as DropRect};
use crate::tui::app::BoardApp;

const CARD_HEIGHT: u16 = 4;

pub(super) fn draw_board(frame: &mut ratatui::Frame, area: Rect, app: &mut BoardApp) {
    app.hit_map.clear();

    let columns = app.board.visible_columns();
    if columns.is_empty() {
        let text = if app.board.fetched_at().is_some() {
            "No orders"
        } else {
            "Loading orders..."
        };
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style()));
        frame.render_widget(widget, area);
        return;
    }

    app.hit_map.board_area = Some(drop_rect(area));
    let constraints = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let carry_target = app.carry.as_ref().map(|carry| carry.target);
    let carried = app.carry.as_ref().map(|carry| carry.order_id.clone());
    let dragging = app.sensor.dragging().cloned();

    for (index, (column, slot)) in columns.iter().zip(slots.iter()).enumerate() {
        let is_target = carry_target == Some(column.status);
        let border = if is_target {
            Style::default()
                .fg(status_color(column.status))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(status_color(column.status))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_target {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border)
            .title(format!("{} ({})", column.status.label(), column.len()));
        let inner = block.inner(*slot);
        frame.render_widget(block, *slot);

        app.hit_map.columns.push(Droppable {
            id: column.id().to_string(),
            rect: drop_rect(*slot),
        });

        let capacity = (inner.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = (index == app.cursor.column).then_some(app.cursor.row);
        let offset = selected_row
            .map(|row| (row + 1).saturating_sub(capacity))
            .unwrap_or(0);

        for (row, order) in column.orders.iter().enumerate().skip(offset).take(capacity) {
            let y = inner.y + ((row - offset) as u16) * CARD_HEIGHT;
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            let lifted = carried.as_ref() == Some(&order.id) || dragging.as_ref() == Some(&order.id);
            let selected = selected_row == Some(row) && app.carry.is_none();
            draw_card(frame, card, order, selected, lifted);
            app.hit_map.cards.push(Droppable {
                id: order.id.as_str().to_string(),
                rect: drop_rect(card),
            });
        }
    }

    if let (Some(active), Some((x, y))) = (dragging, app.pointer) {
        let label = format!(" #{active} ");
        let width = (label.width() as u16).min(area.width);
        let x = x.min(area.x + area.width.saturating_sub(width));
        let ghost = Rect::new(x, y.min(area.y + area.height.saturating_sub(1)), width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default().add_modifier(Modifier::REVERSED),
            )),
            ghost,
        );
    }
}

fn draw_card(frame: &mut ratatui::Frame, area: Rect, order: &Order, selected: bool, lifted: bool) {
    let mut style = Style::default();
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if lifted {
        style = style.add_modifier(Modifier::DIM);
    }

    let table = order
        .table
        .as_deref()
        .map(|table| format!("table {table}"))
        .unwrap_or_else(|| String::from("take-away"));
    let title = truncate(&format!("#{} {}", order.id, table), area.width.saturating_sub(2));
    let summary = format!(
        "{} items  {}  {}",
        order.item_count,
        order.total.round_dp(2),
        order.created_at.format("%H:%M")
    );
    let name = order.customer_name.as_deref().unwrap_or("");

    let lines = vec![
        Line::from(Span::raw(summary)),
        Line::from(Span::raw(name.to_string())),
    ];
    let widget = Paragraph::new(lines).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(if lifted {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .title(title),
    );
    frame.render_widget(widget, area);
}

fn truncate(text: &str, max: u16) -> String {
    let max = max as usize;
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('~');
    out
}

fn drop_rect(area: Rect) -> DropRect {
    DropRect::new(
        f32::from(area.x),
        f32::from(area.y),
        f32::from(area.width),
        f32::from(area.height),
    )
}
