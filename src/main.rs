use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use taskd::libs::config::Config;
use taskd::server::App;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen address for the HTTP server
    #[arg(long, env = "SERVER_ADDRESS", default_value = taskd::libs::config::DEFAULT_ADDR)]
    addr: String,

    /// Path to the SQLite database file
    #[arg(long, env = "DB_PATH", default_value = taskd::libs::config::DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Seconds between overdue sweeps
    #[arg(long, env = "SWEEP_INTERVAL_SECS", default_value_t = taskd::libs::config::DEFAULT_SWEEP_INTERVAL_SECS)]
    sweep_interval_secs: u64,

    /// Keep the sweeper running after a failed sweep instead of stopping it
    #[arg(long, env = "SWEEP_RETRY", default_value_t = false)]
    sweep_retry: bool,

    /// Seconds to let in-flight requests drain on shutdown
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value_t = taskd::libs::config::DEFAULT_SHUTDOWN_GRACE_SECS)]
    shutdown_grace_secs: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Config {
        Config {
            addr: cli.addr,
            db_path: cli.db_path,
            sweep_interval: Duration::from_secs(cli.sweep_interval_secs),
            sweep_fail_fast: !cli.sweep_retry,
            shutdown_grace: Duration::from_secs(cli.shutdown_grace_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskd=info")))
        .init();

    App::new(cli.into()).run().await
}
