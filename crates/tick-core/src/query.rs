//! The display query pipeline: search → filter → sort.
//!
//! Pure and deterministic — the same task list and query always produce the
//! same output. Search and filter both apply before the sort so the sort
//! runs on the reduced set. All sorts are stable: tasks equal under the
//! sort key keep their relative order from the filtered sequence.

use crate::task::{SortKey, StatusFilter, Task};

/// Ephemeral UI inputs driving the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring match on the description. Empty matches
    /// everything.
    pub search: String,
    /// Completion-status filter.
    pub filter: StatusFilter,
    /// Sort key.
    pub sort: SortKey,
}

/// Derive the list to render from the current task list and a query.
pub fn apply(tasks: &[Task], query: &TaskQuery) -> Vec<Task> {
    let needle = query.search.to_lowercase();
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|task| needle.is_empty() || task.description.to_lowercase().contains(&needle))
        .filter(|task| match query.filter {
            StatusFilter::All => true,
            StatusFilter::Completed => task.is_completed,
            StatusFilter::Pending => !task.is_completed,
        })
        .cloned()
        .collect();

    match query.sort {
        SortKey::Name => out.sort_by(|a, b| a.description.cmp(&b.description)),
        SortKey::Date => out.sort_by_key(|task| task.id),
        SortKey::Status => out.sort_by_key(|task| task.is_completed),
    }

    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, description: &str, is_completed: bool) -> Task {
        Task {
            id,
            description: description.to_string(),
            is_completed,
        }
    }

    /// The three-task store used by the scenario tests.
    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", false),
            task(2, "Call mom", true),
            task(3, "Pay rent", false),
        ]
    }

    #[test]
    fn all_filter_is_identity() {
        let tasks = sample();
        let query = TaskQuery {
            sort: SortKey::Date,
            ..TaskQuery::default()
        };
        assert_eq!(apply(&tasks, &query), tasks);
    }

    #[test]
    fn empty_search_matches_everything() {
        let tasks = sample();
        let out = apply(
            &tasks,
            &TaskQuery {
                search: String::new(),
                filter: StatusFilter::All,
                sort: SortKey::Date,
            },
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive() {
        let tasks = vec![task(1, "Walk the dog", false)];
        let out = apply(
            &tasks,
            &TaskQuery {
                search: "WALK".to_string(),
                ..TaskQuery::default()
            },
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn pending_filter_name_sort_scenario() {
        let out = apply(
            &sample(),
            &TaskQuery {
                search: String::new(),
                filter: StatusFilter::Pending,
                sort: SortKey::Name,
            },
        );
        assert_eq!(out, vec![task(1, "Buy milk", false), task(3, "Pay rent", false)]);
    }

    #[test]
    fn substring_search_date_sort_scenario() {
        // "Call mom" and "Pay rent" contain an "a"; "Buy milk" does not.
        // Matches keep id order under the date sort.
        let out = apply(
            &sample(),
            &TaskQuery {
                search: "a".to_string(),
                filter: StatusFilter::All,
                sort: SortKey::Date,
            },
        );
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn search_matching_everything_keeps_id_order_under_date_sort() {
        let out = apply(
            &sample(),
            &TaskQuery {
                search: String::new(),
                filter: StatusFilter::All,
                sort: SortKey::Date,
            },
        );
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn completed_filter_keeps_only_completed() {
        let out = apply(
            &sample(),
            &TaskQuery {
                filter: StatusFilter::Completed,
                ..TaskQuery::default()
            },
        );
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn status_sort_puts_pending_first() {
        let tasks = vec![
            task(1, "a", true),
            task(2, "b", false),
            task(3, "c", true),
            task(4, "d", false),
        ];
        let out = apply(
            &tasks,
            &TaskQuery {
                sort: SortKey::Status,
                ..TaskQuery::default()
            },
        );
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn name_sort_is_stable_for_equal_descriptions() {
        let tasks = vec![
            task(5, "same", false),
            task(2, "same", false),
            task(9, "same", false),
        ];
        let out = apply(
            &tasks,
            &TaskQuery {
                sort: SortKey::Name,
                ..TaskQuery::default()
            },
        );
        // Pre-sort relative order preserved.
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![5, 2, 9]);
    }

    #[test]
    fn search_applies_before_filter_and_sort() {
        let tasks = vec![
            task(1, "alpha", true),
            task(2, "beta", false),
            task(3, "Alpine", false),
        ];
        let out = apply(
            &tasks,
            &TaskQuery {
                search: "alp".to_string(),
                filter: StatusFilter::Pending,
                sort: SortKey::Name,
            },
        );
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn pipeline_does_not_mutate_input() {
        let tasks = sample();
        let _ = apply(
            &tasks,
            &TaskQuery {
                sort: SortKey::Name,
                ..TaskQuery::default()
            },
        );
        assert_eq!(tasks, sample());
    }
}
