//! # taskd - a small task-management HTTP service
//!
//! Clients create, list, update, delete, and toggle completion of tasks
//! persisted in SQLite, while a background sweeper periodically marks tasks
//! overdue once their due date has passed.
//!
//! ## Layout
//!
//! - [`db`]: SQLite bootstrap, migrations, and the task store
//! - [`libs`]: model, commands and validators, orchestrator, sweeper, config
//! - [`server`]: custom router, boundary handlers, app lifecycle

pub mod db;
pub mod libs;
pub mod server;
