// The authoritative task collection and its mutation operations

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::{Task, TaskStatus};

/// Tasks keyed by id.
///
/// Insertion order is kept but carries no meaning; views filter and sort on
/// their own. Every mutation consumes the collection and returns the next one,
/// which the caller both keeps and hands to [`crate::TaskStore::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

/// Move a task to another column (drag-and-drop or a quick-action button)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTask {
    pub task_id: String,
    pub target: TaskStatus,
}

impl MoveTask {
    pub fn new(task_id: impl Into<String>, target: TaskStatus) -> Self {
        Self {
            task_id: task_id.into(),
            target,
        }
    }
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_vec(self) -> Vec<Task> {
        self.tasks
    }

    /// Look up a task by id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the task with the same id in place, or append it if the id is new
    pub fn upsert(mut self, task: Task) -> Self {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => {
                debug!(id = %task.id, "upsert: replacing task");
                *existing = task;
            }
            None => {
                debug!(id = %task.id, "upsert: appending task");
                self.tasks.push(task);
            }
        }
        self
    }

    /// Remove the task with this id. No-op if absent.
    pub fn delete(mut self, id: &str) -> Self {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(id, "delete: no such task");
        }
        self
    }

    /// Replace only the status of a task. No-op if absent.
    pub fn change_status(mut self, id: &str, status: TaskStatus) -> Self {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                debug!(id, from = %task.status, to = %status, "change_status");
                task.status = status;
            }
            None => debug!(id, "change_status: no such task"),
        }
        self
    }

    pub fn apply(self, command: MoveTask) -> Self {
        self.change_status(&command.task_id, command.target)
    }
}

impl From<Vec<Task>> for TaskCollection {
    /// Build a collection, collapsing duplicate ids. The later record wins and
    /// keeps the position of the first occurrence.
    fn from(tasks: Vec<Task>) -> Self {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());

        for task in tasks {
            if let Some(&pos) = positions.get(&task.id) {
                warn!(id = %task.id, "Duplicate task id, keeping the later record");
                unique[pos] = task;
            } else {
                positions.insert(task.id.clone(), unique.len());
                unique.push(task);
            }
        }

        Self { tasks: unique }
    }
}

impl From<TaskCollection> for Vec<Task> {
    fn from(collection: TaskCollection) -> Self {
        collection.tasks
    }
}

impl FromIterator<Task> for TaskCollection {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_tasks;

    #[test]
    fn test_upsert_appends_new_id() {
        let collection = default_tasks().upsert(Task::new("6", "New task"));
        assert_eq!(collection.len(), 6);
        assert_eq!(collection.as_slice()[5].id, "6");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut edited = default_tasks().get("3").unwrap().clone();
        edited.title = "Renamed".to_string();

        let collection = default_tasks().upsert(edited);
        assert_eq!(collection.len(), 5);
        assert_eq!(collection.as_slice()[2].id, "3");
        assert_eq!(collection.get("3").unwrap().title, "Renamed");
    }

    #[test]
    fn test_change_status_then_delete() {
        let original = default_tasks();
        let before = original.get("2").unwrap().clone();
        assert_eq!(before.status, TaskStatus::InProgress);

        let moved = original.clone().change_status("2", TaskStatus::Done);
        let after = moved.get("2").unwrap();
        assert_eq!(after.status, TaskStatus::Done);
        assert_eq!(Task { status: TaskStatus::InProgress, ..after.clone() }, before);

        // Other tasks untouched
        for task in &moved {
            if task.id != "2" {
                assert_eq!(Some(task), original.get(&task.id));
            }
        }

        let deleted = moved.delete("2");
        assert_eq!(deleted.len(), 4);
        assert!(deleted.iter().all(|t| t.id != "2"));
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let original = default_tasks();
        assert_eq!(original.clone().delete("missing"), original);
        assert_eq!(original.clone().change_status("missing", TaskStatus::Done), original);
    }

    #[test]
    fn test_apply_move_command() {
        let collection = default_tasks().apply(MoveTask::new("1", TaskStatus::InProgress));
        assert_eq!(collection.get("1").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_from_vec_collapses_duplicate_ids() {
        let first = Task::new("a", "First");
        let other = Task::new("b", "Other");
        let second = Task::new("a", "Second");

        let collection = TaskCollection::from(vec![first, other, second]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.as_slice()[0].title, "Second");
        assert_eq!(collection.as_slice()[1].id, "b");
    }
}
