//! Backend entry-point: loads settings, prepares storage and serves the API.

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use std::io;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod server;

use server::{ServerConfig, create_server};
use slo_backend::inbound::http::health::HealthState;
use slo_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use slo_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let health_state = web::Data::new(HealthState::new());
    let config = build_server_config(&settings).await?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics()?);

    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr());
    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|e| io::Error::other(format!("database pool creation failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> io::Result<Option<PrometheusMetrics>> {
    PrometheusMetricsBuilder::new("slo")
        .endpoint("/metrics")
        .build()
        .map(Some)
        .map_err(|e| io::Error::other(format!("configure Prometheus metrics: {e}")))
}
