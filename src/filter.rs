// Filter predicates for the board and backlog views

use crate::models::Task;

/// Active filter values from the view. An empty string means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    /// Case-insensitive substring of title or description
    pub search: String,
    /// Exact assignee
    pub assignee: String,
    /// Exact tag
    pub tag: String,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.assignee.is_empty() && self.tag.is_empty()
    }

    /// True if the task passes every active predicate
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_assignee(task) && self.matches_tag(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
    }

    fn matches_assignee(&self, task: &Task) -> bool {
        self.assignee.is_empty() || task.assignee == self.assignee
    }

    fn matches_tag(&self, task: &Task) -> bool {
        self.tag.is_empty() || task.has_tag(&self.tag)
    }
}

/// Tasks passing all active filters, in input order
pub fn filter<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filters.matches(task)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_tasks;

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let tasks = default_tasks();
        let filters = TaskFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filter(tasks.as_slice(), &filters).len(), tasks.len());
    }

    #[test]
    fn test_search_matches_title_or_description_case_insensitive() {
        let tasks = default_tasks();
        let filters = TaskFilters {
            search: "api".to_string(),
            ..Default::default()
        };

        let result = filter(tasks.as_slice(), &filters);
        for task in tasks.iter() {
            let expected = task.title.to_lowercase().contains("api") || task.description.to_lowercase().contains("api");
            assert_eq!(result.iter().any(|t| t.id == task.id), expected, "task {}", task.id);
        }
        // "API Integration" by title; "Integrate with external APIs" by description
        assert_eq!(ids(&result), vec!["2"]);

        let upper = TaskFilters {
            search: "DESIGN".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(tasks.as_slice(), &upper)), vec!["1", "4"]);
    }

    #[test]
    fn test_assignee_is_exact_and_case_sensitive() {
        let tasks = default_tasks();
        let exact = TaskFilters {
            assignee: "Caitlin Clark".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(tasks.as_slice(), &exact)), vec!["5"]);

        let lower = TaskFilters {
            assignee: "caitlin clark".to_string(),
            ..Default::default()
        };
        assert!(filter(tasks.as_slice(), &lower).is_empty());

        let partial = TaskFilters {
            assignee: "Caitlin".to_string(),
            ..Default::default()
        };
        assert!(filter(tasks.as_slice(), &partial).is_empty());
    }

    #[test]
    fn test_tag_is_exact_membership() {
        let tasks = default_tasks();
        let filters = TaskFilters {
            tag: "frontend".to_string(),
            ..Default::default()
        };
        let result = filter(tasks.as_slice(), &filters);
        assert_eq!(ids(&result), vec!["1", "4"]);
        assert!(result.iter().all(|t| t.tags.contains(&"frontend".to_string())));

        let prefix = TaskFilters {
            tag: "front".to_string(),
            ..Default::default()
        };
        assert!(filter(tasks.as_slice(), &prefix).is_empty());
    }

    #[test]
    fn test_filters_are_a_conjunction() {
        let tasks = default_tasks();
        let filters = TaskFilters {
            search: "design".to_string(),
            assignee: "Aliyah Boston".to_string(),
            tag: "frontend".to_string(),
        };
        assert_eq!(ids(&filter(tasks.as_slice(), &filters)), vec!["4"]);

        let contradictory = TaskFilters {
            tag: "backend".to_string(),
            assignee: "Joseph Young".to_string(),
            ..Default::default()
        };
        assert!(filter(tasks.as_slice(), &contradictory).is_empty());
    }
}
