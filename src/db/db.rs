use crate::db::migrations;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Shared handle to the SQLite database.
///
/// A single connection guarded by a mutex; every statement the service
/// issues is a single atomic SQL statement, so the mutex is the only
/// in-process coordination the store needs.
#[derive(Clone)]
pub struct Db {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens (or creates) the database file and applies pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Connection::open(path.as_ref())?;
        // journal_mode returns the resulting mode as a row.
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        migrations::apply(&mut conn)?;
        info!("database connected at {}", path.as_ref().display());

        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// An in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        migrations::apply(&mut conn)?;

        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Releases the underlying connection.
    ///
    /// Returns whether the connection was actually closed: if other clones
    /// are still alive it simply drops with the last one and this returns
    /// false.
    pub fn close(self) -> bool {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                if let Err((_, err)) = mutex.into_inner().close() {
                    error!("failed to close database connection: {err}");
                    false
                } else {
                    info!("database connection closed");
                    true
                }
            }
            Err(_) => {
                info!("database handle still shared, deferring close");
                false
            }
        }
    }
}
