//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by the add and edit
//! screens: two text inputs plus two cycling selectors, with field ordering
//! and form state management.

use crate::{
    fields::{Category, Priority},
    task::Task,
    tui::input::InputField,
};

/// Field order constants for the form view.
pub const NAME_FIELD: usize = 0;
pub const DUE_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
pub const CATEGORY_FIELD: usize = 3;

/// Form state for creating or editing a task.
pub struct TaskForm {
    pub name: InputField,
    pub due: InputField,
    pub priority: usize,
    pub category: usize,
    pub current_field: usize,
    pub priorities: Vec<Priority>,
    pub categories: Vec<Category>,
}

impl TaskForm {
    /// Create an empty form with the data-model defaults selected.
    pub fn new() -> Self {
        let priorities = Priority::ALL.to_vec();
        let categories = Category::ALL.to_vec();
        let priority = priorities
            .iter()
            .position(|&p| p == Priority::default())
            .unwrap_or(0);
        let category = categories
            .iter()
            .position(|&c| c == Category::default())
            .unwrap_or(0);
        Self {
            name: InputField::new(),
            due: InputField::new(),
            priority,
            category,
            current_field: 0,
            priorities,
            categories,
        }
    }

    /// Create a form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.name = InputField::with_value(&task.name);
        form.due = InputField::with_value(
            &task.due_date.map(|d| d.to_string()).unwrap_or_default(),
        );
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == task.priority)
            .unwrap_or(form.priority);
        form.category = form
            .categories
            .iter()
            .position(|&c| c == task.category)
            .unwrap_or(form.category);
        form
    }

    /// Total number of fields (text inputs + selectors).
    pub fn field_count(&self) -> usize {
        4
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which text input is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.name.active = self.current_field == NAME_FIELD;
        self.due.active = self.current_field == DUE_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            NAME_FIELD => self.name.handle_char(c),
            DUE_FIELD => self.due.handle_char(c),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            NAME_FIELD => self.name.handle_backspace(),
            DUE_FIELD => self.due.handle_backspace(),
            _ => {}
        }
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        match self.current_field {
            NAME_FIELD => self.name.handle_delete(),
            DUE_FIELD => self.due.handle_delete(),
            _ => {}
        }
    }

    /// Handle left/right arrows: cursor movement in text fields, cycling in
    /// the selectors.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            NAME_FIELD => {
                if right {
                    self.name.move_cursor_right()
                } else {
                    self.name.move_cursor_left()
                }
            }
            DUE_FIELD => {
                if right {
                    self.due.move_cursor_right()
                } else {
                    self.due.move_cursor_left()
                }
            }
            PRIORITY_FIELD => {
                if right {
                    self.priority = (self.priority + 1) % self.priorities.len();
                } else {
                    self.priority = if self.priority == 0 {
                        self.priorities.len() - 1
                    } else {
                        self.priority - 1
                    };
                }
            }
            CATEGORY_FIELD => {
                if right {
                    self.category = (self.category + 1) % self.categories.len();
                } else {
                    self.category = if self.category == 0 {
                        self.categories.len() - 1
                    } else {
                        self.category - 1
                    };
                }
            }
            _ => {}
        }
    }

    /// The currently selected priority.
    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// The currently selected category.
    pub fn selected_category(&self) -> Category {
        self.categories[self.category]
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}
