//! Database layer for the taskd service.
//!
//! A small persistence layer built on SQLite: connection bootstrap with
//! WAL journaling, a versioned migration runner, and the task store that
//! owns every SQL statement touching task rows.

pub mod db;
pub mod migrations;
pub mod tasks;
