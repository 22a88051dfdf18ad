//! Clean-slate day planning from stored state.
//!
//! Placement runs once, in a fixed order, without backtracking:
//! medications, high-priority tasks, the workout block, medium-priority
//! tasks, the journal block and lunch. The result is then sorted by time.

use super::balance::balance_score;
use crate::agents::estimate_task_minutes;
use mitra_core::{
    ActivityType, AgentKind, ClockTime, MedicationRecord, PlannerConfig, Schedule,
    ScheduleInsights, ScheduleItem, ScheduleRequirement, TaskPriority, TimeOfDay, Timestamp,
    TodoRecord, MEDICATION_PRIORITY,
};

const COORDINATOR: &str = "Central Coordinator";

/// Build a day schedule. `open_tasks` are incomplete to-dos in storage
/// order; every medication gets its fixed slot, duplicates included.
pub fn build_schedule(
    config: &PlannerConfig,
    requirements: &[ScheduleRequirement],
    open_tasks: &[TodoRecord],
    medications: &[MedicationRecord],
    now: Timestamp,
) -> Schedule {
    let mut items: Vec<ScheduleItem> = medications.iter().map(medication_item).collect();
    let mut unscheduled = Vec::new();

    // High-priority tasks run back to back from the start of the workday
    let mut cursor = config.workday_start;
    for todo in open_tasks.iter().filter(|t| t.priority == TaskPriority::High) {
        if cursor >= config.workday_end {
            unscheduled.push(todo.task.clone());
            continue;
        }
        let item = task_item(cursor, todo).fixed();
        cursor = advance(cursor, item.duration_minutes, config.workday_end);
        items.push(item);
    }

    if let Some(duration) = requirement_minutes(requirements, AgentKind::Fitness) {
        items.push(
            ScheduleItem::new(
                config.fitness_time,
                duration,
                "Workout Session",
                ActivityType::Fitness,
                AgentKind::Fitness.display_name(),
            )
            .with_priority(8)
            .with_alternatives(config.fitness_alternatives.clone()),
        );
    }

    for todo in open_tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::Medium)
        .take(config.medium_task_limit)
    {
        let fits = cursor
            .checked_add_hours(1)
            .is_some_and(|next| next < config.workday_end);
        if !fits {
            continue;
        }
        let item = task_item(cursor, todo);
        cursor = advance(cursor, item.duration_minutes, config.workday_end);
        items.push(item);
    }

    if let Some(duration) = requirement_minutes(requirements, AgentKind::Journal) {
        items.push(
            ScheduleItem::new(
                config.journal_time,
                duration,
                "Evening Reflection / Journal",
                ActivityType::Wellness,
                AgentKind::Journal.display_name(),
            )
            .with_priority(5),
        );
    }

    items.push(
        ScheduleItem::new(
            config.lunch_time,
            config.lunch_minutes,
            "Lunch Break",
            ActivityType::Break,
            COORDINATOR,
        )
        .with_priority(8)
        .fixed(),
    );

    items.sort_by_key(|item| item.time);

    let insights = insights(config, &items, unscheduled);
    let balance_score = balance_score(&items);
    Schedule {
        date: now.date_naive(),
        generated_at: now,
        total_activities: items.len(),
        items,
        insights,
        balance_score,
    }
}

pub(crate) fn medication_item(medication: &MedicationRecord) -> ScheduleItem {
    ScheduleItem::new(
        TimeOfDay::slot_for(&medication.time),
        5,
        format!("Take {}", medication.medicine),
        ActivityType::Medication,
        AgentKind::Healthcare.display_name(),
    )
    .with_priority(MEDICATION_PRIORITY)
    .fixed()
}

fn task_item(at: ClockTime, todo: &TodoRecord) -> ScheduleItem {
    ScheduleItem::new(
        at,
        estimate_task_minutes(&todo.task),
        todo.task.clone(),
        ActivityType::Task,
        AgentKind::Task.display_name(),
    )
    .with_priority(todo.priority.score())
}

/// Move the cursor past a block, rounding up to whole hours. A cursor that
/// would leave the day parks at `end`.
fn advance(cursor: ClockTime, duration_minutes: u32, end: ClockTime) -> ClockTime {
    cursor
        .checked_add_hours(duration_minutes.div_ceil(60))
        .unwrap_or(end)
}

fn requirement_minutes(requirements: &[ScheduleRequirement], kind: AgentKind) -> Option<u32> {
    requirements
        .iter()
        .find(|r| r.agent == kind)
        .and_then(ScheduleRequirement::duration_minutes)
}

fn minutes_of(items: &[ScheduleItem], kind: ActivityType) -> u32 {
    items
        .iter()
        .filter(|item| item.activity_type == kind)
        .fold(0, |total, item| total.saturating_add(item.duration_minutes))
}

fn insights(
    config: &PlannerConfig,
    items: &[ScheduleItem],
    unscheduled: Vec<String>,
) -> ScheduleInsights {
    let work = minutes_of(items, ActivityType::Task);
    let fitness = minutes_of(items, ActivityType::Fitness);
    let wellness = minutes_of(items, ActivityType::Wellness);

    let mut recommendations = Vec::new();
    if work > config.overwork_minutes {
        recommendations.push("Consider taking more breaks".to_string());
    }
    if fitness == 0 {
        recommendations.push("Add a workout session".to_string());
    }
    if wellness == 0 {
        recommendations.push("Add reflection time".to_string());
    }
    if !unscheduled.is_empty() {
        recommendations.push(format!(
            "{} high-priority task(s) did not fit before {}; move them to tomorrow",
            unscheduled.len(),
            config.workday_end
        ));
    }

    ScheduleInsights {
        work_life_balance: if fitness > 0 && wellness > 0 {
            "Good"
        } else {
            "Needs Improvement"
        }
        .to_string(),
        total_work_time: format!("{} minutes", work),
        health_score: if fitness >= 30 {
            "Excellent"
        } else {
            "Could be better"
        }
        .to_string(),
        recommendations,
        unscheduled_tasks: unscheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use mitra_core::{RequirementDetail, TimeWindow};
    use mitra_test_utils::assertions::{
        assert_balance_in_range, assert_chronological, assert_medications_fixed,
    };
    use mitra_test_utils::fixtures::{medication, todo};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 19, 6, 30, 0).unwrap()
    }

    fn fitness_requirement() -> ScheduleRequirement {
        ScheduleRequirement::new(
            AgentKind::Fitness,
            RequirementDetail::Fitness {
                recent_workouts: 3,
                recommended_frequency: 5,
                duration_minutes: 45,
                preferred_windows: vec![],
            },
        )
    }

    fn journal_requirement() -> ScheduleRequirement {
        ScheduleRequirement::new(
            AgentKind::Journal,
            RequirementDetail::Journal {
                recommended_frequency: 7,
                duration_minutes: 15,
                preferred_window: TimeWindow::new(ClockTime::at(20, 0), ClockTime::at(22, 0)),
            },
        )
    }

    fn times(schedule: &Schedule) -> Vec<String> {
        schedule.items.iter().map(|i| i.time.to_string()).collect()
    }

    #[test]
    fn test_empty_day_has_lunch_workout_and_reflection() {
        let requirements = [fitness_requirement(), journal_requirement()];
        let schedule = build_schedule(&PlannerConfig::default(), &requirements, &[], &[], now());

        assert_eq!(times(&schedule), vec!["07:00", "12:00", "21:00"]);
        let activities: Vec<_> = schedule.items.iter().map(|i| i.activity.as_str()).collect();
        assert_eq!(
            activities,
            vec!["Workout Session", "Lunch Break", "Evening Reflection / Journal"]
        );

        let workout = &schedule.items[0];
        assert_eq!(workout.duration_minutes, 45);
        assert!(workout.flexible);
        assert_eq!(
            workout.alternative_times,
            vec![ClockTime::at(7, 0), ClockTime::at(18, 0)]
        );

        let lunch = &schedule.items[1];
        assert_eq!(lunch.activity_type, ActivityType::Break);
        assert_eq!(lunch.priority, 8);
        assert!(!lunch.flexible);
        assert_eq!(lunch.agent, "Central Coordinator");

        assert_eq!(schedule.total_activities, 3);
        assert_eq!(schedule.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(schedule.insights.work_life_balance, "Good");
        assert_eq!(schedule.insights.health_score, "Excellent");
        assert_eq!(schedule.insights.total_work_time, "0 minutes");
        assert!(schedule.insights.recommendations.is_empty());
        assert!(schedule.balance_score.abs() < 1e-9);
    }

    #[test]
    fn test_without_requirements_only_lunch_remains() {
        let schedule = build_schedule(&PlannerConfig::default(), &[], &[], &[], now());
        assert_eq!(times(&schedule), vec!["12:00"]);
        assert_eq!(schedule.insights.work_life_balance, "Needs Improvement");
        assert_eq!(schedule.insights.health_score, "Could be better");
        assert_eq!(
            schedule.insights.recommendations,
            vec!["Add a workout session", "Add reflection time"]
        );
    }

    #[test]
    fn test_tasks_follow_the_cursor() {
        let tasks = [
            todo("Finish report", TaskPriority::High),
            todo("Buy groceries", TaskPriority::Medium),
            todo("Call plumber", TaskPriority::High),
            todo("Read novel", TaskPriority::Low),
        ];
        let schedule = build_schedule(&PlannerConfig::default(), &[], &tasks, &[], now());

        let placed: Vec<(String, &str, u8, bool)> = schedule
            .items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Task)
            .map(|i| (i.time.to_string(), i.activity.as_str(), i.priority, i.flexible))
            .collect();
        // report: 09:00 for 120 min, call: 11:00 for 15 min, groceries: 12:00
        assert_eq!(
            placed,
            vec![
                ("09:00".to_string(), "Finish report", 10, false),
                ("11:00".to_string(), "Call plumber", 10, false),
                ("12:00".to_string(), "Buy groceries", 7, true),
            ]
        );
        assert_eq!(schedule.insights.total_work_time, "165 minutes");
        assert_chronological(&schedule.items);
    }

    #[test]
    fn test_medications_are_pinned_and_not_deduplicated() {
        let meds = [
            medication("Aspirin", "night"),
            medication("Vitamin D", "morning"),
            medication("Iron", "Morning"),
        ];
        let schedule = build_schedule(&PlannerConfig::default(), &[], &[], &meds, now());

        assert_eq!(times(&schedule), vec!["08:00", "08:00", "12:00", "22:00"]);
        assert_eq!(schedule.items[0].activity, "Take Vitamin D");
        assert_eq!(schedule.items[1].activity, "Take Iron");
        assert_eq!(schedule.items[0].agent, "Healthcare Agent");
        assert_medications_fixed(&schedule.items);
    }

    #[test]
    fn test_overflowing_high_priority_tasks_are_reported() {
        let tasks: Vec<_> = (0..6)
            .map(|i| todo(&format!("Project phase {}", i), TaskPriority::High))
            .collect();
        let schedule = build_schedule(&PlannerConfig::default(), &[], &tasks, &[], now());

        // two-hour blocks at 09, 11, 13, 15, 17; the sixth would start at 19:00
        let task_times: Vec<_> = schedule
            .items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Task)
            .map(|i| i.time.to_string())
            .collect();
        assert_eq!(task_times, vec!["09:00", "11:00", "13:00", "15:00", "17:00"]);
        assert_eq!(schedule.insights.unscheduled_tasks, vec!["Project phase 5"]);
        assert!(schedule
            .insights
            .recommendations
            .iter()
            .any(|r| r.contains("did not fit before 18:00")));
        assert!(schedule
            .insights
            .recommendations
            .contains(&"Consider taking more breaks".to_string()));
    }

    #[test]
    fn test_medium_tasks_stop_an_hour_before_the_workday_ends() {
        let mut tasks = vec![
            todo("Project A", TaskPriority::High),
            todo("Project B", TaskPriority::High),
            todo("Project C", TaskPriority::High),
            todo("Project D", TaskPriority::High),
        ];
        tasks.push(todo("Email landlord", TaskPriority::Medium));
        let schedule = build_schedule(&PlannerConfig::default(), &[], &tasks, &[], now());

        // cursor sits at 17:00 after four two-hour blocks
        assert!(!schedule.items.iter().any(|i| i.activity == "Email landlord"));
    }

    #[test]
    fn test_only_three_medium_tasks_are_considered() {
        let tasks: Vec<_> = ["Email A", "Email B", "Email C", "Email D"]
            .iter()
            .map(|t| todo(t, TaskPriority::Medium))
            .collect();
        let schedule = build_schedule(&PlannerConfig::default(), &[], &tasks, &[], now());
        let count = schedule
            .items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Task)
            .count();
        assert_eq!(count, 3);
        assert_balance_in_range(schedule.balance_score);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use chrono::Utc;
    use mitra_test_utils::assertions::{
        assert_balance_in_range, assert_chronological, assert_medications_fixed,
    };
    use mitra_test_utils::generators::{
        arb_medication_time_text, arb_task_priority, arb_task_text,
    };
    use proptest::prelude::*;

    fn arb_todo() -> impl Strategy<Value = TodoRecord> {
        (arb_task_text(), arb_task_priority()).prop_map(|(task, priority)| TodoRecord {
            task,
            priority,
            completed: false,
            timestamp: Utc::now(),
        })
    }

    fn arb_medication() -> impl Strategy<Value = MedicationRecord> {
        arb_medication_time_text().prop_map(|time| MedicationRecord {
            medicine: "Pill".to_string(),
            time,
            dose: String::new(),
            taken_today: false,
            timestamp: Utc::now(),
        })
    }

    proptest! {
        #[test]
        fn prop_generated_schedule_invariants(
            tasks in prop::collection::vec(arb_todo(), 0..20),
            meds in prop::collection::vec(arb_medication(), 0..6),
        ) {
            let config = PlannerConfig::default();
            let schedule = build_schedule(&config, &[], &tasks, &meds, Utc::now());

            assert_chronological(&schedule.items);
            assert_medications_fixed(&schedule.items);
            assert_balance_in_range(schedule.balance_score);
            prop_assert_eq!(schedule.total_activities, schedule.items.len());

            for item in schedule.items.iter().filter(|i| i.activity_type == ActivityType::Task) {
                prop_assert!(item.time >= config.workday_start);
                prop_assert!(item.time < config.workday_end);
            }

            let high = tasks.iter().filter(|t| t.priority == TaskPriority::High).count();
            let placed_high = schedule
                .items
                .iter()
                .filter(|i| i.activity_type == ActivityType::Task && i.priority == 10)
                .count();
            prop_assert_eq!(placed_high + schedule.insights.unscheduled_tasks.len(), high);
        }
    }
}
