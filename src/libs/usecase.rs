//! Task orchestration: composes store calls into business operations.
//!
//! This is the only component that knows how a partial update merges with
//! existing state. Reads happen before writes; the merged result of an
//! update is computed locally from the pre-read row instead of re-reading
//! after the write. That saves a round trip but means the returned view can
//! miss a concurrently-sweeping overdue flag — an accepted last-write-wins
//! race, since no operation here uses transactions or versioning.

use crate::db::tasks::Tasks;
use crate::libs::commands::{CreateTaskCommand, UpdateTaskCommand};
use crate::libs::errors::TaskError;
use crate::libs::ident;
use crate::libs::task::Task;
use chrono::{Duration, Local};

pub struct TaskUseCase {
    store: Tasks,
}

impl TaskUseCase {
    pub fn new(store: Tasks) -> TaskUseCase {
        TaskUseCase { store }
    }

    /// Creates a task from a validated command and returns the assembled
    /// record without re-reading it from storage.
    ///
    /// An omitted due date defaults to tomorrow (now + 24h, local time).
    pub fn create_task(&self, cmd: &CreateTaskCommand) -> Result<Task, TaskError> {
        let due_date = match cmd.due_date()? {
            Some(date) => date,
            None => (Local::now() + Duration::hours(24)).date_naive(),
        };

        let task = Task::new(
            ident::generate(),
            cmd.title().unwrap_or_default().to_string(),
            cmd.description().unwrap_or_default().to_string(),
            due_date,
        );

        self.store.save(&task)?;
        Ok(task)
    }

    pub fn get_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.store.get_all()
    }

    /// Applies a partial update and returns the merged result view.
    ///
    /// Unset fields fall back to the value read before the write; a present
    /// due date forces `overdue` to false in the view, mirroring what the
    /// store's update statement did to the row.
    pub fn update_task(&self, id: &str, cmd: &UpdateTaskCommand) -> Result<Task, TaskError> {
        let mut task = self.store.get_by_id(id)?;
        self.store.update(id, cmd)?;

        if let Some(title) = cmd.title() {
            task.title = title.to_string();
        }
        if let Some(description) = cmd.description() {
            task.description = description.to_string();
        }
        if let Some(due_date) = cmd.due_date()? {
            task.due_date = due_date;
            task.overdue = false;
        }

        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        self.store.get_by_id(id)?;
        self.store.delete_by_id(id)
    }

    pub fn change_completion(&self, id: &str, completed: bool) -> Result<Task, TaskError> {
        let mut task = self.store.get_by_id(id)?;
        self.store.set_completion(id, completed)?;
        task.completed = completed;
        Ok(task)
    }

    /// Marks every task due on or before today as overdue. Returns the
    /// number of rows the sweep touched.
    pub fn update_overdue_tasks(&self) -> Result<usize, TaskError> {
        self.store.sweep_overdue(Local::now().date_naive())
    }
}
