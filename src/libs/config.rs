//! Runtime configuration for the service.
//!
//! All knobs arrive through CLI flags with environment-variable fallbacks
//! (loaded from `.env` by the binary before parsing). Defaults favor local
//! development: an on-disk SQLite file next to the process and a one-minute
//! sweep cadence.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "taskd.db";
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address for the HTTP server.
    pub addr: String,
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Cadence of the overdue background sweep.
    pub sweep_interval: Duration,
    /// When true (the default), a failed sweep terminates the sweeper loop;
    /// when false the error is logged and the loop keeps ticking.
    pub sweep_fail_fast: bool,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: DEFAULT_ADDR.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            sweep_fail_fast: true,
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}
