/*
[INPUT]:  The dialog currently open in the dispatcher
[OUTPUT]: Overlay rendering for order details, help, and sign-out confirmation
[POS]:    TUI UI dialog overlay
[UPDATE]: When adding dialog kinds or detail fields
*/

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::{border_style, status_color};
use crate::dialog::{Dialog, OrderDetails};

pub(super) fn draw_dialog(frame: &mut ratatui::Frame, area: Rect, dialog: &Dialog) {
    let (title, lines) = match dialog {
        Dialog::OrderDetails(details) => (format!("Order #{}", details.order.id), detail_lines(details)),
        Dialog::Help => (String::from("Keys"), help_lines()),
        Dialog::ConfirmSignOut => (
            String::from("Sign out"),
            vec![
                Line::from("End this session?"),
                Line::from(""),
                Line::from("[y] sign out   [n] stay"),
            ],
        ),
    };

    frame.render_widget(Clear, area);
    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(title),
    );
    frame.render_widget(widget, area);
}

fn detail_lines(details: &OrderDetails) -> Vec<Line<'static>> {
    let order = &details.order;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status: ", bold),
            Span::styled(
                order.status.label(),
                Style::default().fg(status_color(order.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Table: ", bold),
            Span::raw(order.table.clone().unwrap_or_else(|| "take-away".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Placed: ", bold),
            Span::raw(order.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
    ];
    if let Some(name) = order.customer_name.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Customer: ", bold),
            Span::raw(name.clone()),
        ]));
    }
    if let Some(notes) = order.notes.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Notes: ", bold),
            Span::raw(notes.clone()),
        ]));
    }

    lines.push(Line::from(""));
    if !details.loaded {
        lines.push(Line::from("loading items..."));
    } else if order.items.is_empty() {
        lines.push(Line::from(format!("{} items", order.item_count)));
    } else {
        for item in &order.items {
            lines.push(Line::from(format!(
                "{:>3} x {}  {}",
                item.quantity,
                item.name,
                item.unit_price.round_dp(2)
            )));
        }
    }
    lines.push(Line::from(vec![
        Span::styled("Total: ", bold),
        Span::raw(order.total.round_dp(2).to_string()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from("[Esc] close"));
    lines
}

fn help_lines() -> Vec<Line<'static>> {
    [
        "Arrows / hjkl   move selection",
        "Space           pick up card, Space again to drop",
        "Esc             cancel a move",
        "Enter / click   order details",
        "Mouse drag      move card to another column",
        "r               refresh now",
        "Tab / 1 / 2     switch Board and Logs",
        "o               sign out",
        "q               quit",
    ]
    .into_iter()
    .map(Line::from)
    .collect()
}
