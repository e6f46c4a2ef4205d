//! In-memory task store.
//!
//! The store owns the ordered task collection and the id counter for one
//! interactive session. Mutations keep the `order` field a dense `0..N-1`
//! permutation of the sequence; nothing here touches the filesystem — the
//! codec module handles interchange.

use chrono::{NaiveDate, Utc};

use crate::error::{Result, TrackerError};
use crate::fields::{Category, Priority};
use crate::task::Task;

/// Direction for manual reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Partial update for a task; only the supplied fields are applied.
///
/// `due_date` sets a new date, `clear_due` removes the current one; when both
/// are given the new date wins.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<NaiveDate>,
    pub clear_due: bool,
}

/// Aggregate counts derived from the current store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Session-scoped collection of tasks plus the next-id counter.
///
/// Created at session start and discarded at session end; every operation
/// takes the store explicitly rather than going through process-wide state.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Create an empty store with the counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full task sequence in its current manual order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The id the next created task would receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a new task appended to the end of the sequence.
    ///
    /// Fails when the name trims to empty; the store is left unchanged.
    pub fn create(
        &mut self,
        name: &str,
        priority: Priority,
        category: Category,
        due_date: Option<NaiveDate>,
    ) -> Result<&Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }

        let order = self.tasks.iter().map(|t| t.order).max().unwrap_or(-1) + 1;
        let task = Task {
            id: self.next_id,
            name: name.to_string(),
            completed: false,
            priority,
            category,
            due_date,
            created_at: Utc::now().timestamp(),
            order,
        };
        self.next_id += 1;
        self.tasks.push(task);

        let idx = self.tasks.len() - 1;
        Ok(&self.tasks[idx])
    }

    /// Apply a partial update to a task.
    ///
    /// An unknown id is a silent no-op: the UI only ever issues ids it just
    /// displayed. `id`, `created_at` and `order` are never touched. A name
    /// that trims to empty is rejected like on create.
    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Result<()> {
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(TrackerError::EmptyName);
            }
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        if let Some(name) = patch.name {
            task.name = name.trim().to_string();
        }
        if let Some(p) = patch.priority {
            task.priority = p;
        }
        if let Some(c) = patch.category {
            task.category = c;
        }
        if patch.clear_due {
            task.due_date = None;
        }
        if let Some(d) = patch.due_date {
            task.due_date = Some(d);
        }
        Ok(())
    }

    /// Remove a task and recompact the remaining order values to `0..N-1`.
    ///
    /// Unknown id is a no-op.
    pub fn delete(&mut self, id: u64) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.normalize_order();
        }
    }

    /// Flip a task's completion flag; unknown id is a no-op.
    pub fn toggle_completion(&mut self, id: u64) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
    }

    /// Swap a task with its neighbour in the manual ordering.
    ///
    /// Moving the first task up or the last task down leaves the sequence
    /// unchanged; unknown id is a no-op. Order values are recompacted after
    /// a successful swap.
    pub fn move_task(&mut self, id: u64, direction: Direction) {
        // Operate on the sequence sorted by the order field; after a JSON
        // import the backing vec may not be sorted yet.
        self.tasks.sort_by_key(|t| t.order);

        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return;
        };
        match direction {
            Direction::Up if idx > 0 => self.tasks.swap(idx, idx - 1),
            Direction::Down if idx + 1 < self.tasks.len() => self.tasks.swap(idx, idx + 1),
            _ => return,
        }
        // The vec is now the authoritative sequence; reassign positions
        // directly rather than re-sorting by the stale order values.
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.order = i as i64;
        }
    }

    /// Reassign order values to `0..N-1` following the current sequence.
    pub fn normalize_order(&mut self) {
        self.tasks.sort_by_key(|t| t.order);
        for (idx, task) in self.tasks.iter_mut().enumerate() {
            task.order = idx as i64;
        }
    }

    /// Replace the entire store contents.
    ///
    /// Used by import; the caller guarantees `next_id` exceeds every id in
    /// `tasks`. The previous tasks and counter are discarded.
    pub fn replace_all(&mut self, tasks: Vec<Task>, next_id: u64) {
        self.tasks = tasks;
        self.next_id = next_id;
    }

    /// Total / completed / pending counts for the stats display.
    pub fn counts(&self) -> TaskCounts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskCounts {
            total,
            completed,
            pending: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for name in names {
            store
                .create(name, Priority::Normal, Category::Other, None)
                .unwrap();
        }
        store
    }

    fn orders(store: &TaskStore) -> Vec<i64> {
        store.tasks().iter().map(|t| t.order).collect()
    }

    fn names(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn create_assigns_sequential_ids_and_orders() {
        let store = store_with(&["A", "B", "C"]);
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(orders(&store), vec![0, 1, 2]);
        assert_eq!(store.next_id(), 3);
        assert!(store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn create_trims_name_and_rejects_blank() {
        let mut store = TaskStore::new();
        let task = store
            .create("  Buy milk  ", Priority::Urgent, Category::Personal, None)
            .unwrap();
        assert_eq!(task.name, "Buy milk");

        let err = store.create("   ", Priority::Normal, Category::Other, None);
        assert!(matches!(err, Err(TrackerError::EmptyName)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = store_with(&["A", "B"]);
        store.delete(1);
        store
            .create("C", Priority::Normal, Category::Other, None)
            .unwrap();
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn delete_recompacts_order() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.delete(1);
        assert_eq!(orders(&store), vec![0, 1, 2]);
        assert_eq!(names(&store), vec!["A", "C", "D"]);
        // unknown id: nothing happens
        store.delete(99);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut store = store_with(&["A"]);
        let created_at = store.get(0).unwrap().created_at;

        store
            .update(
                0,
                TaskPatch {
                    priority: Some(Priority::Urgent),
                    ..Default::default()
                },
            )
            .unwrap();
        let task = store.get(0).unwrap();
        assert_eq!(task.name, "A");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.created_at, created_at);
        assert_eq!(task.order, 0);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = store_with(&["A"]);
        store
            .update(
                42,
                TaskPatch {
                    name: Some("ghost".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "A");
    }

    #[test]
    fn update_rejects_blank_name() {
        let mut store = store_with(&["A"]);
        let err = store.update(
            0,
            TaskPatch {
                name: Some("  ".into()),
                ..Default::default()
            },
        );
        assert!(matches!(err, Err(TrackerError::EmptyName)));
        assert_eq!(store.get(0).unwrap().name, "A");
    }

    #[test]
    fn update_clears_due_date() {
        let mut store = TaskStore::new();
        let due = NaiveDate::from_ymd_opt(2026, 1, 1);
        store
            .create("A", Priority::Normal, Category::Other, due)
            .unwrap();
        store
            .update(
                0,
                TaskPatch {
                    clear_due: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.get(0).unwrap().due_date, None);
    }

    #[test]
    fn toggle_flips_and_unknown_is_noop() {
        let mut store = store_with(&["A"]);
        store.toggle_completion(0);
        assert!(store.get(0).unwrap().completed);
        store.toggle_completion(0);
        assert!(!store.get(0).unwrap().completed);
        store.toggle_completion(7);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let mut store = store_with(&["A", "B", "C"]);
        store.move_task(0, Direction::Down);
        assert_eq!(names(&store), vec!["B", "A", "C"]);
        assert_eq!(orders(&store), vec![0, 1, 2]);

        store.move_task(2, Direction::Up);
        assert_eq!(names(&store), vec!["B", "C", "A"]);
        assert_eq!(orders(&store), vec![0, 1, 2]);
    }

    #[test]
    fn move_at_boundary_is_noop() {
        let mut store = store_with(&["A", "B"]);
        store.move_task(0, Direction::Up);
        assert_eq!(names(&store), vec!["A", "B"]);
        store.move_task(1, Direction::Down);
        assert_eq!(names(&store), vec!["A", "B"]);
        assert_eq!(orders(&store), vec![0, 1]);
    }

    #[test]
    fn order_stays_dense_across_mixed_operations() {
        let mut store = store_with(&["A", "B", "C", "D", "E"]);
        store.delete(2);
        store.move_task(4, Direction::Up);
        store
            .create("F", Priority::Normal, Category::Other, None)
            .unwrap();
        store.delete(0);
        store.move_task(5, Direction::Up);

        let mut got = orders(&store);
        got.sort_unstable();
        let expected: Vec<i64> = (0..store.len() as i64).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut store = store_with(&["A", "B"]);
        let replacement = vec![Task {
            id: 10,
            name: "imported".into(),
            completed: true,
            priority: Priority::Important,
            category: Category::Work,
            due_date: None,
            created_at: 0,
            order: 0,
        }];
        store.replace_all(replacement, 11);
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), 11);
        assert!(store.get(0).is_none());
        assert_eq!(store.get(10).unwrap().name, "imported");
    }

    #[test]
    fn counts_track_completion() {
        let mut store = store_with(&["A", "B", "C"]);
        store.toggle_completion(1);
        let counts = store.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.pending, 2);
    }
}
