//! Deriving the display view: filtering then sorting.
//!
//! `view` is a pure function over the store's task slice; it is recomputed on
//! every interaction and never cached across mutations.

use chrono::NaiveDate;

use crate::fields::{Category, Priority, SortMode, StatusFilter};
use crate::task::Task;

/// Filter criteria for the list view. All parts are optional; the default
/// filter matches every task.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub search: String,
}

impl TaskFilter {
    /// True when no criterion is active, i.e. the view shows the full store.
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All
            && self.priority.is_none()
            && self.category.is_none()
            && self.search.trim().is_empty()
    }

    fn matches(&self, task: &Task, search: &str) -> bool {
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Pending => {
                if task.completed {
                    return false;
                }
            }
            StatusFilter::Completed => {
                if !task.completed {
                    return false;
                }
            }
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        if let Some(c) = self.category {
            if task.category != c {
                return false;
            }
        }
        if !search.is_empty() && !task.name.to_lowercase().contains(search) {
            return false;
        }
        true
    }
}

/// Produce the filtered, sorted projection of `tasks` for display.
///
/// Sorting is stable and always puts incomplete tasks before completed ones;
/// the mode selects the secondary key. Tasks without a due date sort last
/// within their completion group in due-date mode.
pub fn view<'a>(tasks: &'a [Task], filter: &TaskFilter, sort: SortMode) -> Vec<&'a Task> {
    let search = filter.search.trim().to_lowercase();
    let mut out: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t, &search)).collect();

    match sort {
        SortMode::Insertion => out.sort_by_key(|t| (t.completed, t.order)),
        SortMode::Priority => out.sort_by_key(|t| (t.completed, t.priority.rank())),
        SortMode::DueDate => {
            out.sort_by_key(|t| (t.completed, t.due_date.unwrap_or(NaiveDate::MAX)))
        }
        SortMode::Name => out.sort_by_key(|t| (t.completed, t.name.to_lowercase())),
    }
    out
}
