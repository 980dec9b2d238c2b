use std::sync::Arc;
use tokio::sync::Mutex;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod seed;
pub mod storage;
pub mod validation;

/// Shared request context. Each server (and each test) owns its own store.
pub struct AppState {
    pub store: Arc<Mutex<storage::WeatherStore>>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(storage::WeatherStore::new())),
            config,
        }
    }
}

pub async fn run_server(config: config::AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let state = Arc::new(AppState::new(config));

    // broadcast channel for shutdown signaling
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    let http_state = state.clone();
    let http_shutdown = shutdown_tx.subscribe();
    let mut server =
        tokio::spawn(async move { api::http::run(http_state, addr, http_shutdown).await });

    // wait for CTRL-C then signal shutdown
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("shutting down");
            let _ = shutdown_tx.send(());
            server.await??;
        }
        res = &mut server => {
            // server exited on its own (bind failure or serve error)
            res??;
        }
    }

    let store = state.store.lock().await;
    tracing::info!(
        readings = store.len(),
        zipcodes = store.zipcode_count(),
        "discarding in-memory readings"
    );
    Ok(())
}
