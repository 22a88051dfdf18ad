//! Day planning.
//!
//! Everything here is pure and synchronous: the coordinator fetches stored
//! state first and hands it over in one piece.

pub mod balance;
pub mod generate;
pub mod merge;
pub mod slots;

pub use balance::{balance_score, CategoryCounts};
pub use generate::build_schedule;
pub use merge::{merge_schedule, MergeSources};
pub use slots::{first_free_slot, is_occupied};
