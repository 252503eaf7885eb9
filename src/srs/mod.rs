pub mod due;
pub mod interval;

pub use due::{due_count, is_due, select_due};
pub use interval::{apply_schedule, compute_next_interval, update_card_after_review};
