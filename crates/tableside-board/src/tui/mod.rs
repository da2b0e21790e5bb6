/*
[INPUT]:  Signed-in session, API client, log buffer
[OUTPUT]: Ratatui kanban board for order statuses
[POS]:    TUI module for the tableside binary
[UPDATE]: When adding TUI submodules or public entry points
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{BoardTui, run_board_tui};
