/*
[INPUT]:  BoardApp state
[OUTPUT]: Full-frame layout: header tabs, board or logs, toasts, footer, dialog overlay
[POS]:    TUI UI module root and shared styles
[UPDATE]: When changing layout or palette
*/

mod board;
mod dialog;
mod footer;
mod logs;

use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use tableside_adapter::OrderStatus;

use super::app::{BoardApp, Tab};
use crate::session::ToastLevel;

pub(super) fn draw_ui(frame: &mut ratatui::Frame, app: &mut BoardApp) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_header(frame, layout[0], app);

    match app.current_tab {
        Tab::Board => board::draw_board(frame, layout[1], app),
        Tab::Logs => {
            app.hit_map.clear();
            logs::draw_logs(frame, layout[1], &app.log_buffer);
        }
    }

    footer::draw_footer(frame, layout[2], app);
    draw_toasts(frame, layout[1], app);

    if let Some(current) = app.dialogs.current() {
        dialog::draw_dialog(frame, centered_rect(area, 60, 60), current);
    }
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &BoardApp) {
    let selected = match app.current_tab {
        Tab::Board => 0,
        Tab::Logs => 1,
    };
    let who = match app.session.user() {
        Some(user) => format!(
            "{} ({:?}) since {}",
            user.name,
            user.role,
            app.session.started_at().with_timezone(&Local).format("%H:%M")
        ),
        None => String::from("signed out"),
    };
    let tabs = Tabs::new(vec![Line::from("Board"), Line::from("Logs")])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(format!("Tableside - {who}")),
        )
        .highlight_style(header_style())
        .select(selected);
    frame.render_widget(tabs, area);
}

/// Newest toasts stacked in the top-right corner of `area`.
fn draw_toasts(frame: &mut ratatui::Frame, area: Rect, app: &BoardApp) {
    let toasts = app.session.toasts();
    if toasts.is_empty() {
        return;
    }
    let width = area.width.min(48);
    let mut y = area.y;
    for toast in toasts.iter() {
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, 3);
        let color = match toast.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::LightGreen,
            ToastLevel::Error => Color::LightRed,
        };
        let widget = Paragraph::new(Span::raw(toast.message.as_str()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, rect);
        frame.render_widget(widget, rect);
        y += 3;
    }
}

pub(super) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

pub(super) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(super) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::Preparing => Color::LightBlue,
        OrderStatus::Ready => Color::LightGreen,
        OrderStatus::Shipped => Color::LightMagenta,
        OrderStatus::Delivered => Color::Gray,
    }
}
