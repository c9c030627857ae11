//! Overdue background sweeper.
//!
//! A single tokio task driven by one `select!` loop over a tick interval and
//! a stop channel. The sweep itself is awaited inline, so ticks never
//! overlap; a tick missed while a slow sweep runs is delayed, not burst.

use crate::libs::usecase::TaskUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

pub struct Sweeper {
    usecase: Arc<TaskUseCase>,
    interval: Duration,
    fail_fast: bool,
}

impl Sweeper {
    pub fn new(usecase: Arc<TaskUseCase>, interval: Duration, fail_fast: bool) -> Sweeper {
        Sweeper {
            usecase,
            interval,
            fail_fast,
        }
    }

    /// Runs the sweep loop until the stop channel fires or, with
    /// `fail_fast`, until a sweep fails.
    ///
    /// A sweep failure is fatal to this loop only, never to the HTTP server.
    pub async fn run(self, mut stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately once; the first sweep waits a full tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => match self.usecase.update_overdue_tasks() {
                    Ok(swept) => info!("updated overdue tasks ({swept} swept)"),
                    Err(e) => {
                        error!("error updating overdue tasks: {e}");
                        if self.fail_fast {
                            return;
                        }
                    }
                },
                _ = stop.changed() => {
                    info!("stopping overdue sweeper");
                    return;
                }
            }
        }
    }
}
