//! Planner configuration

use crate::clock::ClockTime;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knobs for schedule generation and merging.
///
/// `Default` yields the fixed constants the planner has always used; the
/// only value callers normally override is `fetch_timeout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub workday_start: ClockTime,
    pub workday_end: ClockTime,
    pub lunch_time: ClockTime,
    pub lunch_minutes: u32,
    /// Candidate start times tried in order when looking for a free slot.
    pub probe_slots: Vec<ClockTime>,
    pub fitness_time: ClockTime,
    pub fitness_alternatives: Vec<ClockTime>,
    pub journal_time: ClockTime,
    pub medium_task_limit: usize,
    pub urgent_merge_limit: usize,
    pub merge_workout_minutes: u32,
    pub workout_history_window: usize,
    pub habit_window: usize,
    /// Items longer than this get a break suggestion during merge.
    pub long_item_minutes: u32,
    /// Work time above this gets a "more breaks" recommendation.
    pub overwork_minutes: u32,
    pub fetch_timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            workday_start: ClockTime::at(9, 0),
            workday_end: ClockTime::at(18, 0),
            lunch_time: ClockTime::at(12, 0),
            lunch_minutes: 60,
            probe_slots: [7, 8, 9, 10, 11, 14, 15, 16, 17, 18, 19]
                .into_iter()
                .map(|hour| ClockTime::at(hour, 0))
                .collect(),
            fitness_time: ClockTime::at(7, 0),
            fitness_alternatives: vec![ClockTime::at(7, 0), ClockTime::at(18, 0)],
            journal_time: ClockTime::at(21, 0),
            medium_task_limit: 3,
            urgent_merge_limit: 2,
            merge_workout_minutes: 45,
            workout_history_window: 7,
            habit_window: 5,
            long_item_minutes: 90,
            overwork_minutes: 480,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl PlannerConfig {
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Reject configurations the planner cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workday_start >= self.workday_end {
            return Err(ConfigError::InvalidValue {
                field: "workday_end".to_string(),
                value: self.workday_end.to_string(),
                reason: format!("must be after workday_start {}", self.workday_start),
            });
        }
        if self.probe_slots.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "probe_slots".to_string(),
            });
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout".to_string(),
                value: "0ms".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
