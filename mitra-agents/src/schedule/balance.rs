//! Work/health/break balance score

use mitra_core::{ActivityType, ScheduleItem};

const IDEAL_WORK: f64 = 5.0;
const IDEAL_HEALTH: f64 = 3.0;
const IDEAL_BREAKS: f64 = 2.0;
// Dividing each ideal by this only yields proportions because the ideals sum to it.
const IDEAL_DIVISOR: f64 = 10.0;

/// Item counts per balance bucket. User blocks count toward none of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub work: usize,
    pub health: usize,
    pub breaks: usize,
}

impl CategoryCounts {
    pub fn tally(items: &[ScheduleItem]) -> Self {
        items
            .iter()
            .fold(Self::default(), |mut counts, item| {
                match item.activity_type {
                    ActivityType::Task => counts.work += 1,
                    ActivityType::Break => counts.breaks += 1,
                    kind if kind.is_health() => counts.health += 1,
                    _ => {}
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.work + self.health + self.breaks
    }

    /// Score in `[0, 100]`; 100 means the ideal 5:3:2 split.
    pub fn score(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        let deviation = (self.work as f64 / total - IDEAL_WORK / IDEAL_DIVISOR).abs()
            + (self.health as f64 / total - IDEAL_HEALTH / IDEAL_DIVISOR).abs()
            + (self.breaks as f64 / total - IDEAL_BREAKS / IDEAL_DIVISOR).abs();

        (100.0 - 100.0 * deviation).clamp(0.0, 100.0)
    }
}

pub fn balance_score(items: &[ScheduleItem]) -> f64 {
    CategoryCounts::tally(items).score()
}
