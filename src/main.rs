//! Bandstand API server.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store with development tokens
//! BANDSTAND__AUTH__TOKENS=dev-m:alice:musician,dev-v:bob:venue bandstand
//!
//! # Postgres
//! BANDSTAND__STORE__BACKEND=postgres \
//! BANDSTAND__STORE__URL=postgres://localhost/bandstand \
//! BANDSTAND__STORE__RUN_MIGRATIONS=true bandstand
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use bandstand::adapters::clock::SystemClock;
use bandstand::adapters::http::{app, ApiServices};
use bandstand::adapters::identity::StaticIdentityProvider;
use bandstand::adapters::memory::InMemoryDocumentStore;
use bandstand::adapters::postgres::PostgresDocumentStore;
use bandstand::adapters::storage::TimeoutDocumentStore;
use bandstand::config::{AppConfig, StoreBackend, StoreConfig};
use bandstand::ports::{DocumentStore, QueryCapabilities};
use bandstand::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config.server);

    let store = open_store(&config.store).await?;
    let store: Arc<dyn DocumentStore> =
        Arc::new(TimeoutDocumentStore::new(store, config.store.timeout()));

    let identity = StaticIdentityProvider::from_entries(config.auth.token_entries())
        .context("parsing auth tokens")?;
    if identity.is_empty() {
        tracing::warn!("No auth tokens configured; every /api request will be rejected");
    }

    let services = ApiServices::over_store(store, Arc::new(SystemClock), config.retry.max_attempts);
    let router = app(services, Arc::new(identity), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        backend = ?config.store.backend,
        "Bandstand listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            let capabilities = if config.restricted_queries {
                QueryCapabilities::restricted()
            } else {
                QueryCapabilities::full()
            };
            Ok(Arc::new(InMemoryDocumentStore::with_capabilities(capabilities)))
        }
        StoreBackend::Postgres => {
            let url = config.url().context("store.url is required for postgres")?;
            let store =
                PostgresDocumentStore::connect(url, config.max_connections, config.acquire_timeout())
                    .await
                    .context("connecting to postgres")?;
            if config.run_migrations {
                store
                    .run_migrations(&config.migrations_dir)
                    .await
                    .context("running migrations")?;
                tracing::info!(dir = %config.migrations_dir.display(), "Migrations applied");
            }
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
