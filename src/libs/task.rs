use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single managed entity: a to-do item with a due date and derived flags.
///
/// `due_date` serializes as `YYYY-MM-DD`. `overdue` is never true for a task
/// whose due date lies in the future; any due-date-bearing write resets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub overdue: bool,
    pub completed: bool,
}

impl Task {
    pub fn new(id: String, title: String, description: String, due_date: NaiveDate) -> Self {
        Task {
            id,
            title,
            description,
            due_date,
            overdue: false,
            completed: false,
        }
    }
}
