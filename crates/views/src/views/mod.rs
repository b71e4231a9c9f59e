//! Read model views.

pub mod order_history;
pub mod task_board;

pub use order_history::{OrderHistoryView, TimelineStep};
pub use task_board::{TaskBoard, TaskBoardView};
