//! Merging stored state into a caller's own day.
//!
//! Caller items are never moved or removed. Additions only go into start
//! times nothing else occupies, with the single exception of the workout
//! fallback when every probe slot is taken.

use super::balance::balance_score;
use super::generate::medication_item;
use super::slots::first_free_slot;
use crate::agents::estimate_task_minutes;
use mitra_core::{
    ActivityType, AgentKind, ClockTime, MedicationRecord, MergeInsights, MergedSchedule,
    PlannerConfig, ScheduleItem, TaskPriority, Timestamp, TodoRecord,
};

const FITNESS_KEYWORDS: [&str; 3] = ["workout", "exercise", "gym"];

/// Stored state the merge draws on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSources<'a> {
    /// Incomplete to-dos in storage order.
    pub open_tasks: &'a [TodoRecord],
    pub medications: &'a [MedicationRecord],
    /// Number of recent workouts on record.
    pub recent_workouts: usize,
}

pub fn merge_schedule(
    config: &PlannerConfig,
    user_items: Vec<ScheduleItem>,
    sources: MergeSources<'_>,
    now: Timestamp,
) -> MergedSchedule {
    let user_activities = user_items.len();
    let mut items: Vec<ScheduleItem> = user_items
        .into_iter()
        .map(ScheduleItem::normalized)
        .collect();
    let mut suggestions = Vec::new();

    // Checked against the growing list, so two medications sharing a slot
    // conflict with each other as well.
    for medication in sources.medications {
        let item = medication_item(medication);
        match items.iter().find(|existing| existing.time == item.time) {
            Some(conflict) => suggestions.push(format!(
                "💊 Medication \"{}\" scheduled at {} conflicts with \"{}\". Consider adjusting.",
                medication.medicine, item.time, conflict.activity
            )),
            None => {
                suggestions.push(format!(
                    "✅ Added medication \"{}\" at {}",
                    medication.medicine, item.time
                ));
                items.push(item.suggested());
            }
        }
    }

    let has_fitness = items.iter().any(|item| item.mentions_any(&FITNESS_KEYWORDS));
    if !has_fitness && sources.recent_workouts > 0 {
        let at = first_free_slot(&items, &config.probe_slots, ClockTime::MIDNIGHT)
            .unwrap_or(config.fitness_time);
        items.push(
            ScheduleItem::new(
                at,
                config.merge_workout_minutes,
                "Workout Session (AI Suggested)",
                ActivityType::Fitness,
                AgentKind::Fitness.display_name(),
            )
            .with_priority(8)
            .suggested(),
        );
        suggestions.push(format!(
            "💪 Added workout session at {} based on your fitness history",
            at
        ));
    }

    for item in items
        .iter()
        .filter(|i| i.duration_minutes > config.long_item_minutes)
        .filter(|i| i.activity_type != ActivityType::Break)
    {
        suggestions.push(format!(
            "⏰ Consider adding a break during \"{}\" ({} min is quite long)",
            item.activity, item.duration_minutes
        ));
    }

    for todo in sources
        .open_tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::High)
        .take(config.urgent_merge_limit)
    {
        let Some(at) = first_free_slot(&items, &config.probe_slots, config.workday_start) else {
            continue;
        };
        items.push(
            ScheduleItem::new(
                at,
                estimate_task_minutes(&todo.task),
                format!("{} (High Priority)", todo.task),
                ActivityType::Task,
                AgentKind::Task.display_name(),
            )
            .with_priority(9)
            .fixed()
            .suggested(),
        );
        suggestions.push(format!(
            "📝 Added high-priority task \"{}\" at {}",
            todo.task, at
        ));
    }

    items.sort_by_key(|item| item.time);

    let total_work_time = minutes_where(&items, |kind| {
        matches!(kind, ActivityType::Task | ActivityType::User)
    });
    let total_health_time = minutes_where(&items, |kind| kind.is_health());
    let balance_score = balance_score(&items);
    let ai_suggestions = items.iter().filter(|item| item.added_by_ai).count();

    MergedSchedule {
        date: now.date_naive(),
        generated_at: now,
        total_activities: items.len(),
        user_activities,
        ai_suggestions,
        items,
        insights: MergeInsights {
            recommendations: suggestions,
            work_life_balance: if balance_score > 70.0 {
                "Good Balance"
            } else {
                "Needs Improvement"
            }
            .to_string(),
            total_work_time,
            total_health_time,
            ai_enhancements: format!(
                "AI added {} suggestions to improve your schedule",
                ai_suggestions
            ),
        },
        balance_score,
    }
}

fn minutes_where(items: &[ScheduleItem], keep: impl Fn(ActivityType) -> bool) -> u32 {
    items
        .iter()
        .filter(|item| keep(item.activity_type))
        .fold(0, |total, item| total.saturating_add(item.duration_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mitra_test_utils::fixtures::{medication, todo, user_item};

    fn merge(
        user: Vec<ScheduleItem>,
        tasks: &[TodoRecord],
        meds: &[MedicationRecord],
        workouts: usize,
    ) -> MergedSchedule {
        merge_schedule(
            &PlannerConfig::default(),
            user,
            MergeSources {
                open_tasks: tasks,
                medications: meds,
                recent_workouts: workouts,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_medication_colliding_with_user_item_is_reported() {
        let merged = merge(
            vec![user_item("08:00", "Standup", 30)],
            &[],
            &[medication("Vitamin D", "morning")],
            0,
        );

        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.items[0].activity, "Standup");
        assert_eq!(merged.ai_suggestions, 0);
        assert_eq!(
            merged.insights.recommendations,
            vec!["💊 Medication \"Vitamin D\" scheduled at 08:00 conflicts with \"Standup\". Consider adjusting."]
        );
    }

    #[test]
    fn test_free_medication_slot_is_filled() {
        let merged = merge(
            vec![user_item("08:00", "Standup", 30)],
            &[],
            &[medication("Metformin", "afternoon")],
            0,
        );

        assert_eq!(merged.items.len(), 2);
        let added = &merged.items[1];
        assert_eq!(added.time, ClockTime::at(14, 0));
        assert!(added.added_by_ai);
        assert!(!added.flexible);
        assert_eq!(added.priority, 10);
        assert_eq!(merged.user_activities, 1);
        assert_eq!(merged.ai_suggestions, 1);
        assert_eq!(
            merged.insights.recommendations,
            vec!["✅ Added medication \"Metformin\" at 14:00"]
        );
    }

    #[test]
    fn test_urgent_task_goes_to_first_open_workday_slot() {
        let merged = merge(vec![], &[todo("Finish report", TaskPriority::High)], &[], 0);

        assert_eq!(merged.items.len(), 1);
        let task = &merged.items[0];
        assert_eq!(task.time, ClockTime::at(9, 0));
        assert_eq!(task.activity, "Finish report (High Priority)");
        assert_eq!(task.duration_minutes, 120);
        assert_eq!(task.priority, 9);
        assert!(task.added_by_ai);
        assert_eq!(merged.insights.total_work_time, 120);
        assert_eq!(
            merged.insights.ai_enhancements,
            "AI added 1 suggestions to improve your schedule"
        );
    }

    #[test]
    fn test_caller_medication_is_pinned() {
        let mut pills = user_item("08:00", "Vitamin D", 5);
        pills.activity_type = ActivityType::Medication;
        let merged = merge(vec![pills], &[], &[], 0);

        assert_eq!(merged.items[0].priority, 10);
        assert!(!merged.items[0].flexible);
        assert!(!merged.items[0].added_by_ai);
        assert_eq!(merged.user_activities, 1);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let merged = merge(
            vec![
                user_item("08:00", "Offsite", 3_000_000_000),
                user_item("09:00", "Offsite", 3_000_000_000),
            ],
            &[],
            &[],
            0,
        );
        assert_eq!(merged.insights.total_work_time, u32::MAX);
        assert_eq!(merged.total_activities, 2);
    }

    #[test]
    fn test_second_medication_in_same_slot_conflicts_with_first() {
        let merged = merge(
            vec![],
            &[],
            &[medication("Aspirin", "night"), medication("Melatonin", "night")],
            0,
        );
        assert_eq!(merged.items.len(), 1);
        assert!(merged.insights.recommendations[1].contains("conflicts with \"Take Aspirin\""));
    }

    #[test]
    fn test_workout_inserted_only_with_history_and_no_existing_fitness() {
        let user = vec![user_item("07:00", "Breakfast", 30)];

        let without_history = merge(user.clone(), &[], &[], 0);
        assert_eq!(without_history.items.len(), 1);

        let with_history = merge(user, &[], &[], 4);
        let workout = &with_history.items[1];
        assert_eq!(workout.time, ClockTime::at(8, 0));
        assert_eq!(workout.duration_minutes, 45);
        assert!(workout.flexible);
        assert_eq!(
            with_history.insights.recommendations,
            vec!["💪 Added workout session at 08:00 based on your fitness history"]
        );

        let already_training = merge(vec![user_item("18:00", "GYM with Sam", 60)], &[], &[], 4);
        assert_eq!(already_training.items.len(), 1);
    }

    #[test]
    fn test_workout_falls_back_to_morning_when_every_probe_is_taken() {
        let user: Vec<_> = PlannerConfig::default()
            .probe_slots
            .iter()
            .map(|t| ScheduleItem::user(*t, 30, "Busy"))
            .collect();
        let merged = merge(user, &[todo("Call bank", TaskPriority::High)], &[], 1);

        let workout: Vec<_> = merged
            .items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Fitness)
            .collect();
        assert_eq!(workout.len(), 1);
        assert_eq!(workout[0].time, ClockTime::at(7, 0));
        // no slot left for the task and no fallback for it
        assert!(!merged.items.iter().any(|i| i.activity_type == ActivityType::Task));
    }

    #[test]
    fn test_long_items_get_break_suggestion() {
        let mut lunch = user_item("12:00", "Long lunch", 120);
        lunch.activity_type = ActivityType::Break;
        let merged = merge(vec![user_item("09:00", "Deep work", 180), lunch], &[], &[], 0);

        assert_eq!(
            merged.insights.recommendations,
            vec!["⏰ Consider adding a break during \"Deep work\" (180 min is quite long)"]
        );
        assert_eq!(merged.items.len(), 2);
    }

    #[test]
    fn test_only_two_urgent_tasks_and_only_high_priority() {
        let tasks = [
            todo("Call A", TaskPriority::High),
            todo("Call B", TaskPriority::Medium),
            todo("Call C", TaskPriority::High),
            todo("Call D", TaskPriority::High),
        ];
        let merged = merge(vec![user_item("09:00", "Standup", 15)], &tasks, &[], 0);
        let added: Vec<_> = merged
            .items
            .iter()
            .filter(|i| i.added_by_ai)
            .map(|i| (i.time.to_string(), i.activity.clone()))
            .collect();
        assert_eq!(
            added,
            vec![
                ("10:00".to_string(), "Call A (High Priority)".to_string()),
                ("11:00".to_string(), "Call C (High Priority)".to_string()),
            ]
        );
    }

    #[test]
    fn test_balance_label_and_totals() {
        let merged = merge(
            vec![user_item("09:00", "Emails", 30)],
            &[],
            &[medication("Aspirin", "night")],
            0,
        );
        assert_eq!(merged.insights.total_work_time, 30);
        assert_eq!(merged.insights.total_health_time, 5);
        assert_eq!(merged.insights.work_life_balance, "Needs Improvement");
    }
}
