// Form input for creating and editing tasks

use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use uuid::Uuid;

use crate::models::{Priority, Task, TaskStatus, now};

/// Field values entered by the user. `None` leaves a field at its default
/// (for new tasks) or unchanged (for edits).
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    /// Drop an existing due date
    pub clear_due_date: bool,
    /// Tags added on top of `tags` (or the existing tags when editing)
    pub add_tags: Vec<String>,
    /// Tags removed after all additions
    pub remove_tags: Vec<String>,
}

impl TaskDraft {
    /// Build a new task with a fresh id and creation time.
    ///
    /// Status defaults to scheduled and priority to medium.
    pub fn into_new_task(self) -> Result<Task> {
        let title = required_title(self.title.as_deref())?;

        let mut task = Task::new(new_task_id(), title);
        task.description = self.description.unwrap_or_default();
        task.status = self.status.unwrap_or_default();
        task.assignee = self.assignee.unwrap_or_default();
        for tag in self.tags.unwrap_or_default() {
            task.add_tag(&tag);
        }
        task.priority = Some(self.priority.unwrap_or(Priority::Medium));
        if !self.clear_due_date {
            task.due_date = self.due_date;
        }
        apply_tag_edits(&mut task, &self.add_tags, &self.remove_tags);
        Ok(task)
    }

    /// Apply the entered fields to an existing task. Id and creation time are kept.
    pub fn apply_to(self, mut task: Task) -> Result<Task> {
        if let Some(title) = self.title.as_deref() {
            task.title = required_title(Some(title))?;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(tags) = self.tags {
            task.tags.clear();
            for tag in tags {
                task.add_tag(&tag);
            }
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if self.clear_due_date {
            task.due_date = None;
        } else if let Some(due) = self.due_date {
            task.due_date = Some(due);
        }
        apply_tag_edits(&mut task, &self.add_tags, &self.remove_tags);
        Ok(task)
    }
}

/// Fresh, time-ordered task id
pub fn new_task_id() -> String {
    Uuid::now_v7().to_string()
}

fn apply_tag_edits(task: &mut Task, add: &[String], remove: &[String]) {
    for tag in add {
        task.add_tag(tag);
    }
    for tag in remove {
        task.remove_tag(tag.trim());
    }
}

fn required_title(title: Option<&str>) -> Result<String> {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(eyre!("Task title is required")),
    }
}
