pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let files = ServeDir::new(&state.config.uploads_dir);
    let images = ServeDir::new(&state.config.static_images_dir);
    let file_prefix = state.config.file_mount();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/market/summary/{ticker}", get(handlers::market_summary))
        .route(
            "/announcements/list-enriched",
            get(handlers::announcements_list_enriched),
        )
        .route("/cards", get(handlers::list_cards).post(handlers::create_card))
        .route("/debug/static-status", get(handlers::static_status))
        .nest_service(&file_prefix, files)
        .nest_service("/static/images", images)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
