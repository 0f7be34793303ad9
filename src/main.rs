//! Fujitsu Console Exporter
//!
//! Scrapes power and temperature readings from the web console of a Fujitsu
//! server management controller (iRMC) and exposes them as Prometheus metrics.
//!
//! # Architecture
//!
//! Nothing runs in the background. Each `GET /metrics` performs one scrape:
//! - **Power** (`/13`): whole-system draw and per-element draw
//! - **Temperature** (`/18`): one reading per sensor with its thresholds
//!
//! Both pages sit behind HTTP Digest authentication and are fetched
//! concurrently. A page that cannot be fetched or parsed drops only its own
//! metric family from the response.
//!
//! # Features
//!
//! - RFC 2617 Digest authentication (MD5, `qop=auth`)
//! - Bounded retries with backoff on transient console failures
//! - Graceful shutdown on SIGTERM/SIGINT

mod config;
mod console;
mod coordinator;
mod error;
mod exposition;
mod model;
mod server;


use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

use crate::console::Client;
use crate::coordinator::ScrapeCoordinator;
use crate::model::MetricMapper;
use crate::server::AppState;

/// Application entry point.
///
/// Initializes logging from `LOG_LEVEL`, then runs the exporter until a
/// termination signal arrives.
#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Exporter stopped with an error");
        std::process::exit(1);
    }
}

/// Loads the remaining configuration, wires the scrape pipeline and serves
/// until shutdown.
async fn run() -> error::Result<()> {
    let console_config = config::load_console_config()?;
    let exporter_config = config::load_exporter_config()?;
    let listen_address = exporter_config.socket_addr()?;

    let user = console_config.user.clone();
    let timeout_seconds = console_config.timeout_seconds;
    let client = Arc::new(Client::new(console_config)?);
    tracing::info!(
        url = client.base_url(),
        %user,
        timeout_seconds,
        "Using management console"
    );

    let mapper = Arc::new(MetricMapper::new());
    let state = Arc::new(AppState {
        coordinator: ScrapeCoordinator::new(client, Arc::clone(&mapper)),
        mapper,
    });

    let listener = TcpListener::bind(listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", listen_address))?;

    server::serve(listener, state, shutdown_signal())
        .await
        .context("Exporter server failed")?;

    tracing::info!("Exporter stopped");
    Ok(())
}

/// Resolves on the first SIGTERM or Ctrl-C.
async fn shutdown_signal() {
    let mut sig_term = match signal(SignalKind::terminate()) {
        Ok(sig_term) => sig_term,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to register SIGTERM handler");
            let _ = ctrl_c().await;
            tracing::info!("Received SIGINT. Shutting down...");
            return;
        }
    };
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");

    tokio::select! {
        // Handle SIGTERM for graceful shutdown in containers
        _ = sig_term.recv() => {
            tracing::info!("Received SIGTERM. Shutting down...");
        }
        _ = ctrl_c() => {
            tracing::info!("Received SIGINT. Shutting down...");
        }
    }
}
