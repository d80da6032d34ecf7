use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::error::ApiResult;
use super::state::AppState;
use crate::announcements;
use crate::market;
use crate::model::{AnnouncementListing, Card, MarketSummary, NewCard};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CardCreated {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StaticStatus {
    pub static_images_dir: String,
    pub announcements_uploads_dir: String,
    pub data_dir: String,
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "MarketNews API is running",
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /market/summary/{ticker}
pub async fn market_summary(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> ApiResult<Json<MarketSummary>> {
    let data_dir = state.config.data_dir.clone();
    let summary =
        tokio::task::spawn_blocking(move || market::summarize(&data_dir, &ticker)).await??;
    Ok(Json(summary))
}

/// GET /announcements/list-enriched
pub async fn announcements_list_enriched(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AnnouncementListing>> {
    let uploads_dir = state.config.uploads_dir.clone();
    let data_dir = state.config.data_dir.clone();
    let prefix = state.config.file_mount();
    let listing = tokio::task::spawn_blocking(move || {
        announcements::list_enriched(&uploads_dir, &data_dir, &prefix)
    })
    .await??;
    Ok(Json(listing))
}

/// POST /cards
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(card): Json<NewCard>,
) -> ApiResult<Json<CardCreated>> {
    let id = state.storage.lock().await.create_card(&card)?;
    info!("Card {} created", id);
    Ok(Json(CardCreated {
        id,
        message: "Card created",
    }))
}

/// GET /cards
pub async fn list_cards(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Card>>> {
    let cards = state.storage.lock().await.list_cards()?;
    Ok(Json(cards))
}

/// GET /debug/static-status
pub async fn static_status(State(state): State<Arc<AppState>>) -> Json<StaticStatus> {
    let cfg = &state.config;
    Json(StaticStatus {
        static_images_dir: cfg.static_images_dir.display().to_string(),
        announcements_uploads_dir: cfg.uploads_dir.display().to_string(),
        data_dir: cfg.data_dir.display().to_string(),
    })
}
