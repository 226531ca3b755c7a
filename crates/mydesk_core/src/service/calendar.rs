//! Calendar projections over tasks.
//!
//! # Invariants
//! - Day markers keep task order and show at most [`MAX_DAY_MARKERS`]
//!   priorities; the rest is reported as `overflow`.
//! - Months are 1-based; an invalid year/month yields no markers.

use crate::model::task::{Priority, Task};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MAX_DAY_MARKERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMarkers {
    pub day: NaiveDate,
    pub priorities: Vec<Priority>,
    pub overflow: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority_pending: usize,
}

/// Tasks scheduled on `day`, in collection order.
pub fn tasks_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.date == day).collect()
}

/// Marker rows for every day of the month that has at least one task.
pub fn month_markers(tasks: &[Task], year: i32, month: u32) -> Vec<DayMarkers> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    for day in first.iter_days().take_while(|day| day.month() == month) {
        let scheduled = tasks_on(tasks, day);
        if scheduled.is_empty() {
            continue;
        }
        days.push(DayMarkers {
            day,
            priorities: scheduled
                .iter()
                .take(MAX_DAY_MARKERS)
                .map(|task| task.priority)
                .collect(),
            overflow: scheduled.len().saturating_sub(MAX_DAY_MARKERS),
        });
    }
    days
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskStats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        high_priority_pending: tasks
            .iter()
            .filter(|task| task.priority == Priority::High && !task.completed)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::{month_markers, task_stats, tasks_on, TaskStats};
    use crate::model::entity::{new_entity_id, Entity};
    use crate::model::task::{Priority, Task, TaskDraft};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn task(title: &str, day: u32, priority: Priority) -> Task {
        Task::from_draft(
            new_entity_id(),
            TaskDraft::new(title).with_priority(priority).on(date(day)),
            date(1),
        )
    }

    #[test]
    fn tasks_on_filters_by_exact_day() {
        let tasks = vec![task("a", 3, Priority::Low), task("b", 4, Priority::Low)];
        let found = tasks_on(&tasks, date(3));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "a");
    }

    #[test]
    fn month_markers_cap_priorities_and_count_overflow() {
        let tasks = vec![
            task("a", 29, Priority::High),
            task("b", 29, Priority::Medium),
            task("c", 29, Priority::Low),
            task("d", 29, Priority::High),
            task("e", 10, Priority::Low),
            Task::from_draft(
                new_entity_id(),
                TaskDraft::new("march").on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
                date(1),
            ),
        ];

        let markers = month_markers(&tasks, 2024, 2);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].day, date(10));
        assert_eq!(markers[1].day, date(29));
        assert_eq!(
            markers[1].priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
        assert_eq!(markers[1].overflow, 1);
        assert!(month_markers(&tasks, 2024, 13).is_empty());
    }

    #[test]
    fn stats_count_pending_high_priority() {
        let mut tasks = vec![
            task("a", 1, Priority::High),
            task("b", 1, Priority::High),
            task("c", 1, Priority::Low),
        ];
        tasks[0].completed = true;

        assert_eq!(
            task_stats(&tasks),
            TaskStats {
                total: 3,
                completed: 1,
                pending: 2,
                high_priority_pending: 1,
            }
        );
    }
}
