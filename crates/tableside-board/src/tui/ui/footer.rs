/*
[INPUT]:  BoardApp status message, carry state, feed error
[OUTPUT]: Hotkey footer rendered into Ratatui frame
[POS]:    TUI UI footer rendering
[UPDATE]: When keybindings change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::border_style;
use crate::tui::app::BoardApp;

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &BoardApp) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let line1 = if app.carry.is_some() {
        Line::from(vec![
            Span::styled("[Left/Right]", key_style),
            Span::raw(" Target  "),
            Span::styled("[Space]", key_style),
            Span::raw(" Drop  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Arrows]", key_style),
            Span::raw(" Select  "),
            Span::styled("[Space]", key_style),
            Span::raw(" Move  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Details  "),
            Span::styled("[r]", key_style),
            Span::raw(" Refresh  "),
            Span::styled("[?]", key_style),
            Span::raw(" Help  "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ])
    };

    let status_style = if app.feed_error.is_some() {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default()
    };
    let line2 = Line::from(vec![
        Span::raw("Status: "),
        Span::styled(app.status_message.clone(), status_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
