/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing log panel layout
*/

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::border_style;
use crate::logging::{LogBufferHandle, lock_buffer};

pub(super) fn draw_logs(frame: &mut ratatui::Frame, area: Rect, buffer: &LogBufferHandle) {
    let available = area.height.saturating_sub(2) as usize;
    let view = lock_buffer(buffer).tail(available);

    let text = view
        .into_iter()
        .map(|line| Line::from(Span::raw(line)))
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Logs"),
    );
    frame.render_widget(log_widget, area);
}
