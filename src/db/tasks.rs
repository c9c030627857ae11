//! Task store: the sole reader and writer of task rows.
//!
//! Every mutating operation is a single SQL statement, so each one is atomic
//! under SQLite and never partially applies. Failures are logged here for
//! diagnostics and propagated upward untouched; translating them into HTTP
//! status codes is the handlers' job.

use crate::db::db::Db;
use crate::libs::commands::UpdateTaskCommand;
use crate::libs::errors::TaskError;
use crate::libs::task::Task;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use tracing::error;

const SELECT_FIELDS: &str = "SELECT id, title, description, due_date, overdue, completed FROM tasks";

#[derive(Clone)]
pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: Db) -> Tasks {
        Tasks { db }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            due_date: row.get(3)?,
            overdue: row.get(4)?,
            completed: row.get(5)?,
        })
    }

    pub fn save(&self, task: &Task) -> Result<(), TaskError> {
        self.db
            .conn
            .lock()
            .execute(
                "INSERT INTO tasks (id, title, description, due_date, overdue, completed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    task.id,
                    task.title,
                    task.description,
                    task.due_date,
                    task.overdue,
                    task.completed
                ],
            )
            .inspect_err(|e| error!("failed to save task: {e}"))?;
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        let conn = self.db.conn.lock();
        let mut stmt = conn.prepare(SELECT_FIELDS).inspect_err(|e| error!("failed to fetch tasks: {e}"))?;
        let tasks = stmt
            .query_map([], Self::from_row)
            .inspect_err(|e| error!("failed to fetch tasks: {e}"))?
            .collect::<rusqlite::Result<Vec<Task>>>()
            .inspect_err(|e| error!("failed to scan task: {e}"))?;
        Ok(tasks)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Task, TaskError> {
        let conn = self.db.conn.lock();
        conn.query_row(&format!("{SELECT_FIELDS} WHERE id = ?1"), params![id], Self::from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => TaskError::NotFound,
                other => {
                    error!("failed to fetch task {id}: {other}");
                    TaskError::Storage(other)
                }
            })
    }

    /// Applies the supplied fields of `cmd` to one row in one statement.
    ///
    /// A present due date also resets `overdue` in the same statement, so the
    /// row can never carry a future due date together with the overdue flag,
    /// regardless of how a concurrent sweep interleaves.
    pub fn update(&self, id: &str, cmd: &UpdateTaskCommand) -> Result<(), TaskError> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(title) = cmd.title() {
            clauses.push("title = ?");
            args.push(Box::new(title.to_string()));
        }
        if let Some(description) = cmd.description() {
            clauses.push("description = ?");
            args.push(Box::new(description.to_string()));
        }
        if let Some(due_date) = cmd.due_date()? {
            clauses.push("due_date = ?");
            args.push(Box::new(due_date));
            clauses.push("overdue = ?");
            args.push(Box::new(false));
        }

        if clauses.is_empty() {
            return Err(TaskError::NoFieldsToUpdate);
        }

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", clauses.join(", "));
        args.push(Box::new(id.to_string()));

        self.db
            .conn
            .lock()
            .execute(&sql, rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())))
            .inspect_err(|e| error!("failed to update task {id}: {e}"))?;
        Ok(())
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), TaskError> {
        self.db
            .conn
            .lock()
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .inspect_err(|e| error!("failed to delete task {id}: {e}"))?;
        Ok(())
    }

    pub fn set_completion(&self, id: &str, completed: bool) -> Result<(), TaskError> {
        self.db
            .conn
            .lock()
            .execute("UPDATE tasks SET completed = ?1 WHERE id = ?2", params![completed, id])
            .inspect_err(|e| error!("failed to change completion status of task {id}: {e}"))?;
        Ok(())
    }

    /// Marks every not-yet-overdue task whose due date has passed as of the
    /// given date. One set-oriented statement; returns rows affected.
    pub fn sweep_overdue(&self, as_of: NaiveDate) -> Result<usize, TaskError> {
        let swept = self
            .db
            .conn
            .lock()
            .execute(
                "UPDATE tasks SET overdue = 1 WHERE due_date <= ?1 AND overdue = 0",
                params![as_of],
            )
            .inspect_err(|e| error!("failed to sweep overdue tasks: {e}"))?;
        Ok(swept)
    }
}
