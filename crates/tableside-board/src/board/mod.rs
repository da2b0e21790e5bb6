/*
[INPUT]:  Order snapshots and drag-end events
[OUTPUT]: Board model, column partitioning, and transition resolution
[POS]:    Board layer root - the status-transition core
[UPDATE]: When adding board modules or public exports
*/

pub mod model;
pub mod partition;
pub mod resolver;

pub use model::{Board, BoardSnapshot};
pub use partition::{partition, visible_columns, Column};
pub use resolver::{destination_status, evaluate_drop, resolve_transition, DragOutcome, Transition};
