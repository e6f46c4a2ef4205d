//! Task data structure.
//!
//! This module defines the core `Task` struct: a single to-do item with its
//! priority, category, optional due date and manual-ordering position.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{Category, Priority};

/// A single to-do item.
///
/// `id` is unique within a store and never reused; `created_at` is a UTC
/// epoch-seconds timestamp set once at creation; `order` is the manual
/// ordering position maintained by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub created_at: i64,
    pub order: i64,
}
