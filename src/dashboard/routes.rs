//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! View endpoints load the session on first use; export never does.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::views::{
    alerts_view, keywords_view, overview_view, prices_view, status_view, AlertsView,
    KeywordsView, OverviewView, PricesView, StatusView,
};
use crate::config::AppConfig;
use crate::session::PresentationSession;
use crate::types::{DashboardError, Snapshot};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub session: RwLock<PresentationSession>,
    pub config: AppConfig,
}

impl DashboardState {
    pub fn new(session: PresentationSession, config: AppConfig) -> Self {
        Self {
            session: RwLock::new(session),
            config,
        }
    }

    /// Current snapshot, loading the session first if it is still empty.
    pub async fn current_snapshot(&self) -> Arc<Snapshot> {
        if let Some(snapshot) = self.session.read().await.snapshot() {
            return snapshot;
        }
        self.session.write().await.initialize().await
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::ExportUnavailable => StatusCode::CONFLICT,
            DashboardError::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub threshold: Option<f64>,
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusView> {
    let session = state.session.read().await;
    Json(status_view(&session))
}

/// GET /api/overview
pub async fn get_overview(State(state): State<AppState>) -> Json<OverviewView> {
    let snapshot = state.current_snapshot().await;
    Json(overview_view(&snapshot))
}

/// GET /api/prices
pub async fn get_prices(State(state): State<AppState>) -> Json<PricesView> {
    let snapshot = state.current_snapshot().await;
    Json(prices_view(&snapshot, state.config.analysis.top_deals))
}

/// GET /api/alerts?threshold=<pct>
pub async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Json<AlertsView> {
    let threshold = query.threshold.unwrap_or(state.config.alerts.discount_threshold);
    let snapshot = state.current_snapshot().await;
    Json(alerts_view(&snapshot, threshold))
}

/// GET /api/keywords
pub async fn get_keywords(State(state): State<AppState>) -> Json<KeywordsView> {
    let snapshot = state.current_snapshot().await;
    Json(keywords_view(&snapshot))
}

/// POST /api/refresh
pub async fn post_refresh(State(state): State<AppState>) -> Json<StatusView> {
    let mut session = state.session.write().await;
    session.refresh().await;
    info!(session = %session.id(), "Manual refresh");
    Json(status_view(&session))
}

/// GET /api/export
pub async fn get_export(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let export = state.session.read().await.export_snapshot()?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
