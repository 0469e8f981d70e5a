//! Waitlist API - Entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waitlist_api::{
    api::{create_router, AppState},
    config::Config,
    notify::{NoopNotifier, Notifier, ResendNotifier},
    registrar::Registrar,
    store::{MemoryStore, RecordStore, RestStore},
};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Waitlist API");

    // Initialize the record store
    let store: Arc<dyn RecordStore> = match config.store.backend.as_str() {
        "memory" => {
            warn!("Using in-memory store (signups will be lost on restart)");
            Arc::new(MemoryStore::new())
        }
        _ => {
            let store = match RestStore::new(
                &config.store.url,
                &config.store.api_key,
                &config.store.table,
            ) {
                Ok(s) => s,
                Err(e) => {
                    error!("Failed to create store client: {}", e);
                    std::process::exit(1);
                }
            };
            if !store.health_check().await {
                warn!(url = %config.store.url, "Record store is not answering");
            }
            Arc::new(store)
        }
    };

    // Initialize the welcome email notifier
    let notifier: Arc<dyn Notifier> = if config.notifier.enabled {
        match ResendNotifier::new(
            &config.notifier.api_url,
            &config.notifier.api_key,
            &config.notifier.from,
            &config.notifier.subject,
        ) {
            Ok(n) => Arc::new(n),
            Err(e) => {
                error!("Failed to create email client: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("Email dispatch disabled");
        Arc::new(NoopNotifier)
    };

    // Create application state
    let state = AppState::new(Registrar::new(store.clone(), notifier), store);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
