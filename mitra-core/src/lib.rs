//! Mitra Core - Data Types
//!
//! Pure data structures shared by every other crate: clock time, schedule
//! items, agent responses, persisted records, errors and planner settings.
//! Routing and scheduling logic lives in `mitra-agents`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod agent;
pub mod clock;
pub mod config;
pub mod enums;
pub mod error;
pub mod records;
pub mod schedule;

pub use agent::*;
pub use clock::*;
pub use config::*;
pub use enums::*;
pub use error::*;
pub use records::*;
pub use schedule::*;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Record identifier using UUIDv7 so ids sort by creation time.
pub type RecordId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 record id.
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ids_are_v7_and_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 7);
    }
}
