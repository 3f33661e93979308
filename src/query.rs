// Sorting, board grouping and filter facets

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use eyre::eyre;
use feruca::Collator;

use crate::models::{Priority, Task, TaskStatus};

/// Backlog sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first
    #[default]
    CreatedAt,
    Title,
    Assignee,
    /// Highest first, absent priority ranked as medium
    Priority,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::Title => "title",
            SortKey::Assignee => "assignee",
            SortKey::Priority => "priority",
        }
    }

    /// Ordering of two tasks under this key
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
            SortKey::Title => locale_cmp(&a.title, &b.title),
            SortKey::Assignee => locale_cmp(&a.assignee, &b.assignee),
            SortKey::Priority => Priority::resolve(b.priority)
                .rank()
                .cmp(&Priority::resolve(a.priority).rank()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created-at" | "created_at" => Ok(SortKey::CreatedAt),
            "title" => Ok(SortKey::Title),
            "assignee" => Ok(SortKey::Assignee),
            "priority" => Ok(SortKey::Priority),
            other => Err(eyre!(
                "Invalid sort key: {} (expected createdAt, title, assignee or priority)",
                other
            )),
        }
    }
}

/// Stable sort of a filtered subset. Equal keys keep their input order.
pub fn sort(mut tasks: Vec<&Task>, key: SortKey) -> Vec<&Task> {
    tasks.sort_by(|a, b| key.compare(a, b));
    tasks
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Locale-aware string comparison using the Unicode Collation Algorithm with
/// the CLDR root ordering: base letters first, then accents, then case
/// (lowercase before uppercase)
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Filtered tasks partitioned into the three board columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board<'a> {
    pub scheduled: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Board<'a> {
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Scheduled => &self.scheduled,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Columns in board order
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL.into_iter().map(move |status| (status, self.column(status)))
    }

    pub fn len(&self) -> usize {
        self.scheduled.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition tasks by status, keeping input order within each column
pub fn group_by_status<'a>(tasks: &[&'a Task]) -> Board<'a> {
    let mut board = Board::default();
    for &task in tasks {
        match task.status {
            TaskStatus::Scheduled => board.scheduled.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Done => board.done.push(task),
        }
    }
    board
}

/// Distinct non-empty assignees across the full collection, first-seen order
pub fn distinct_assignees(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .map(|t| t.assignee.as_str())
        .filter(|a| !a.is_empty())
        .filter(|a| seen.insert(*a))
        .map(str::to_string)
        .collect()
}

/// Distinct tags across the full collection, first-seen order
pub fn distinct_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .flat_map(|t| t.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{TaskFilters, filter};
    use crate::seed::default_tasks;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, priority: Option<Priority>) -> Task {
        let mut task = Task::new(id, format!("Task {}", id));
        task.priority = priority;
        task
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_priority_ranks_absent_as_medium() {
        let tasks = vec![
            task("low", Some(Priority::Low)),
            task("high", Some(Priority::High)),
            task("medium", Some(Priority::Medium)),
            task("none", None),
        ];

        let sorted = sort(tasks.iter().collect(), SortKey::Priority);
        assert_eq!(ids(&sorted), vec!["high", "medium", "none", "low"]);
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let tasks = vec![
            task("none", None),
            task("low", Some(Priority::Low)),
            task("medium", Some(Priority::Medium)),
        ];

        let sorted = sort(tasks.iter().collect(), SortKey::Priority);
        assert_eq!(ids(&sorted), vec!["none", "medium", "low"]);
    }

    #[test]
    fn test_sort_by_created_at_newest_first() {
        let tasks = default_tasks();
        let sorted = sort(tasks.iter().collect(), SortKey::CreatedAt);
        assert_eq!(ids(&sorted), vec!["5", "4", "2", "1", "3"]);
    }

    #[test]
    fn test_sort_by_title_and_assignee() {
        let tasks = default_tasks();

        let by_title = sort(tasks.iter().collect(), SortKey::Title);
        assert_eq!(ids(&by_title), vec!["2", "1", "4", "5", "3"]);

        let by_assignee = sort(tasks.iter().collect(), SortKey::Assignee);
        assert_eq!(ids(&by_assignee), vec!["4", "5", "1", "3", "2"]);
    }

    #[test]
    fn test_sort_created_at_ties_keep_input_order() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut a = Task::new("a", "A");
        let mut b = Task::new("b", "B");
        a.created_at = ts;
        b.created_at = ts;
        let tasks = vec![b, a];

        let sorted = sort(tasks.iter().collect(), SortKey::CreatedAt);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_accented_letters() {
        assert_eq!(locale_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_cmp("éclair", "fable"), Ordering::Less);
        assert_eq!(locale_cmp("Ångström", "Bjørn"), Ordering::Less);
        // Accents break ties on the base letters, case breaks ties after that
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("résumé", "Résumé"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_title_places_accented_titles_alphabetically() {
        let tasks = default_tasks().upsert(Task::new("6", "Élan setup"));
        let by_title = sort(tasks.iter().collect(), SortKey::Title);
        assert_eq!(ids(&by_title), vec!["2", "1", "6", "4", "5", "3"]);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert_eq!("priority".parse::<SortKey>().unwrap(), SortKey::Priority);
        assert!("dueDate".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_group_by_status_partitions() {
        let tasks = default_tasks();
        let all = filter(tasks.as_slice(), &TaskFilters::default());
        let board = group_by_status(&all);

        assert_eq!(ids(board.column(TaskStatus::Scheduled)), vec!["1", "4"]);
        assert_eq!(ids(board.column(TaskStatus::InProgress)), vec!["2", "5"]);
        assert_eq!(ids(board.column(TaskStatus::Done)), vec!["3"]);

        // Disjoint, and the union is the input
        assert_eq!(board.len(), all.len());
        let mut union: Vec<&str> = board.columns().flat_map(|(_, col)| ids(col)).collect();
        union.sort();
        let mut expected = ids(&all);
        expected.sort();
        assert_eq!(union, expected);

        for (status, column) in board.columns() {
            assert!(column.iter().all(|t| t.status == status));
        }
    }

    #[test]
    fn test_group_by_status_of_filtered_subset() {
        let tasks = default_tasks();
        let filters = TaskFilters {
            tag: "backend".to_string(),
            ..Default::default()
        };
        let subset = filter(tasks.as_slice(), &filters);
        let board = group_by_status(&subset);

        assert!(board.scheduled.is_empty());
        assert_eq!(ids(&board.in_progress), vec!["2"]);
        assert_eq!(ids(&board.done), vec!["3"]);
    }

    #[test]
    fn test_group_by_status_empty() {
        let board = group_by_status(&[]);
        assert!(board.is_empty());
        assert_eq!(board.columns().count(), 3);
    }

    #[test]
    fn test_distinct_facets_from_full_collection() {
        let tasks = default_tasks().upsert(Task::new("6", "Unassigned"));

        let assignees = distinct_assignees(tasks.as_slice());
        assert_eq!(
            assignees,
            vec!["Joseph Young", "Tyrese Haliburton", "Reggie Miller", "Aliyah Boston", "Caitlin Clark"]
        );

        let tags = distinct_tags(tasks.as_slice());
        assert_eq!(
            tags,
            vec!["design", "frontend", "backend", "api", "security", "mobile", "performance", "optimization"]
        );
    }
}
