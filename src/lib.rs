//! objectd — in-memory record store served over a small REST API.
//!
//! This crate wires the layers together and re-exports them so integration
//! tests can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! main (clap, tracing) ──► serve (axum, graceful shutdown)
//!                              │
//!                              ▼
//!                    objectd-api::router ──► objectd-core::SharedStore
//! ```

use std::future::Future;

use tokio::net::TcpListener;

pub use objectd_api::{self as api, router, ApiError};
pub use objectd_core::{self as store_core, config::Config, Record, RecordStore, SharedStore};

/// Build the initial store from configuration.
pub fn build_store(config: &Config) -> SharedStore {
    let store = if config.store.seed {
        RecordStore::with_seed()
    } else {
        RecordStore::new()
    };
    SharedStore::new(store)
}

/// Serve the API on `listener` until `shutdown` resolves, then drain
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, store: SharedStore, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = build_store(&config);
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;

    tracing::info!(
        addr = %local,
        records = store.len().await,
        "objectd listening"
    );

    serve(listener, store, shutdown_signal()).await?;
    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
