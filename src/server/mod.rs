//! HTTP application: wiring, serving, and graceful shutdown.
//!
//! The custom [`router::Router`] owns all routing policy; axum only carries
//! connections to it through a single fallback handler. Shutdown order:
//! signal the sweeper and the server together, drain in-flight requests
//! within the configured grace period, then close the storage handle.

pub mod handlers;
pub mod helpers;
pub mod router;

use crate::db::db::Db;
use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::sweeper::Sweeper;
use crate::libs::usecase::TaskUseCase;
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Request bodies larger than this are rejected before decoding.
const BODY_LIMIT: usize = 64 * 1024;

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> App {
        App { config }
    }

    /// Runs the service until a termination signal arrives.
    pub async fn run(self) -> Result<()> {
        let db = Db::open(&self.config.db_path)?;
        let store = Tasks::new(db.clone());
        let usecase = Arc::new(TaskUseCase::new(store));

        let (stop_tx, stop_rx) = watch::channel(false);
        let sweeper = Sweeper::new(usecase.clone(), self.config.sweep_interval, self.config.sweep_fail_fast);
        let sweeper_handle = tokio::spawn(sweeper.run(stop_rx));

        let router = Arc::new(handlers::build_router(usecase));
        let app = axum::Router::new()
            .fallback(dispatch)
            .with_state(router)
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.config.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.config.addr))?;
        info!("server started on {}", self.config.addr);

        let mut shutdown_rx = stop_tx.subscribe();
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        });
        let mut server_handle = tokio::spawn(async move { serve.await });

        shutdown_signal().await;
        info!("shutdown signal received");
        let _ = stop_tx.send(true);

        // Bounded drain of in-flight requests, then force close. The abort
        // releases the server task's storage handle so the close below is
        // not deferred to a leaked clone.
        match tokio::time::timeout(self.config.shutdown_grace, &mut server_handle).await {
            Ok(joined) => {
                joined.context("server task panicked")?.context("server error")?;
            }
            Err(_) => {
                warn!("graceful shutdown timed out, force closing");
                server_handle.abort();
                let _ = server_handle.await;
            }
        }

        let _ = sweeper_handle.await;
        db.close();
        info!("server stopped");
        Ok(())
    }
}

/// Feeds every request through the custom router.
async fn dispatch(State(router): State<Arc<router::Router>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return Response::builder()
                .status(StatusCode::PAYLOAD_TOO_LARGE)
                .body(Body::empty())
                .unwrap_or_default()
        }
    };
    router.dispatch(&parts.method, parts.uri.path(), bytes).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
