// Built-in example tasks for a board that has never been saved

use chrono::{DateTime, TimeZone, Utc};

use crate::collection::TaskCollection;
use crate::models::{Priority, Task, TaskStatus};

/// The five example tasks with stable ids "1" through "5"
pub fn default_tasks() -> TaskCollection {
    TaskCollection::from(vec![
        seed_task(
            "1",
            "Design System Setup",
            "Create a comprehensive design system with components, colors, and typography guidelines.",
            TaskStatus::Scheduled,
            "Joseph Young",
            &["design", "frontend"],
            day(2024, 1, 15),
            Priority::High,
        ),
        seed_task(
            "2",
            "API Integration",
            "Integrate with external APIs for data synchronization and real-time updates.",
            TaskStatus::InProgress,
            "Tyrese Haliburton",
            &["backend", "api"],
            day(2024, 1, 16),
            Priority::Medium,
        ),
        seed_task(
            "3",
            "User Authentication",
            "Implement secure user authentication with JWT tokens and role-based access.",
            TaskStatus::Done,
            "Reggie Miller",
            &["security", "backend"],
            day(2024, 1, 10),
            Priority::High,
        ),
        seed_task(
            "4",
            "Mobile Responsive Design",
            "Ensure the application works perfectly on all mobile devices and screen sizes.",
            TaskStatus::Scheduled,
            "Aliyah Boston",
            &["frontend", "mobile"],
            day(2024, 1, 17),
            Priority::Medium,
        ),
        seed_task(
            "5",
            "Performance Optimization",
            "Optimize application performance, reduce bundle size, and improve loading times.",
            TaskStatus::InProgress,
            "Caitlin Clark",
            &["performance", "optimization"],
            day(2024, 1, 18),
            Priority::Low,
        ),
    ])
}

#[allow(clippy::too_many_arguments)]
fn seed_task(
    id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    assignee: &str,
    tags: &[&str],
    created_at: DateTime<Utc>,
    priority: Priority,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        assignee: assignee.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at,
        priority: Some(priority),
        due_date: None,
    }
}

// Seed dates are calendar days at UTC midnight
fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tasks_ids() {
        let tasks = default_tasks();
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_default_tasks_fields() {
        let tasks = default_tasks();

        let api = tasks.get("2").unwrap();
        assert_eq!(api.title, "API Integration");
        assert_eq!(api.status, TaskStatus::InProgress);
        assert_eq!(api.assignee, "Tyrese Haliburton");
        assert_eq!(api.tags, vec!["backend", "api"]);
        assert_eq!(api.created_at, Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap());
        assert_eq!(api.priority, Some(Priority::Medium));
        assert_eq!(api.due_date, None);

        let perf = tasks.get("5").unwrap();
        assert_eq!(perf.priority, Some(Priority::Low));
    }
}
