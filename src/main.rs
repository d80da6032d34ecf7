use marketnews::api::{self, AppState};
use marketnews::config::{AppConfig, load_config};
use std::fs;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marketnews=info,tower_http=info")),
        )
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config_path =
        std::env::var("MARKETNEWS_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    ensure_directories(&config);

    let bind_addr = config.bind_addr();
    let state = match AppState::from_config(config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    info!(
        "Serving data from {}, announcements from {}",
        state.config.data_dir.display(),
        state.config.uploads_dir.display()
    );
    let app = api::router(state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };
    info!("MarketNews API listening on {}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

/// Creates the data, uploads and images directories if they are missing.
fn ensure_directories(config: &AppConfig) {
    for dir in [&config.data_dir, &config.uploads_dir, &config.static_images_dir] {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Failed to create {}: {}", dir.display(), e);
        }
    }
}
