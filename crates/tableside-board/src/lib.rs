/*
[INPUT]:  Public API exports for the tableside-board crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod dialog;
pub mod drag;
pub mod feed;
pub mod logging;
pub mod notifier;
pub mod session;
pub mod tui;

// Re-export main types for convenience
pub use board::{Board, BoardSnapshot, Column, DragOutcome, Transition};
pub use crate::config::BoardConfig;
pub use dialog::{DialogDispatcher, DialogRequest};
pub use drag::DragEnd;
pub use feed::{FeedState, OrderFeed};
pub use notifier::{ApiNotifier, DeferredNotifier, NotifierOutcome, StatusChangeNotifier};
pub use session::SessionContext;
