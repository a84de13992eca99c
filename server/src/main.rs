//! Eventboard server binary.
//!
//! Run with:
//! ```bash
//! SEED_FILE=server/data/catalog.json AUTH_TOKENS=dev-token=alice cargo run --bin eventboard-server
//! ```

use eventboard_server::{build_app, open_store, seed_if_configured, Config};
use std::future::IntoFuture;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventboard=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Eventboard server");

    let config = Config::from_env();
    info!(?config, "Configuration loaded");

    let store = open_store(&config).await?;
    if let Some(report) = seed_if_configured(&config, store.as_ref()).await? {
        info!(events = report.events_inserted, "Seed file applied");
    }

    let app = build_app(&config, store)?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.wait_for(|stop| *stop).await;
    });
    let mut server = tokio::spawn(serve.into_future());

    tokio::select! {
        result = &mut server => {
            result??;
            info!("Server stopped");
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    info!(timeout = ?config.shutdown_timeout, "Draining in-flight requests");
    let _ = stop_tx.send(true);

    match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
        Ok(result) => result??,
        Err(_) => {
            warn!("Shutdown timeout elapsed, aborting open connections");
            server.abort();
        },
    }

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
