//! Dashboard: Axum web server for the competitor views.
//!
//! Serves a JSON API and a self-contained HTML dashboard with four tabs
//! (Overview, Prices, Alerts, Keywords). CORS enabled for local development.

pub mod routes;
pub mod views;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use routes::{AppState, DashboardState};

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Bind `port` and serve the dashboard until `shutdown` resolves.
pub async fn serve_dashboard<F>(state: AppState, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server starting on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/status", get(routes::get_status))
        .route("/api/overview", get(routes::get_overview))
        .route("/api/prices", get(routes::get_prices))
        .route("/api/alerts", get(routes::get_alerts))
        .route("/api/keywords", get(routes::get_keywords))
        .route("/api/refresh", post(routes::post_refresh))
        .route("/api/export", get(routes::get_export))
        .route("/health", get(routes::health))
        // Dashboard HTML
        .route("/", get(serve_dashboard_html))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML dashboard.
async fn serve_dashboard_html() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::data::DemoProvider;
    use crate::session::PresentationSession;

    fn test_state() -> AppState {
        let session = PresentationSession::new(Arc::new(DemoProvider::new()));
        Arc::new(DashboardState::new(session, AppConfig::default()))
    }

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_overview_endpoint() {
        let json = get_json(build_router(test_state()), "/api/overview").await;
        assert_eq!(json["metrics"]["total_offers"], 30);
        assert_eq!(json["metrics"]["competitor_count"], 3);
        assert_eq!(json["competitors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_prices_endpoint() {
        let json = get_json(build_router(test_state()), "/api/prices").await;
        assert_eq!(json["offers"].as_array().unwrap().len(), 9);
        assert_eq!(json["top_deals"][0]["title"], "Gratis-Service");
    }

    #[tokio::test]
    async fn test_alerts_endpoint_with_threshold() {
        let json = get_json(build_router(test_state()), "/api/alerts?threshold=101").await;
        let alerts = json["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0]["severity"], "OK");
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let json = get_json(build_router(test_state()), "/api/keywords").await;
        assert_eq!(json["keywords"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_refresh_requires_post() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/refresh").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_export_before_load_is_conflict() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("nothing to export"));
    }

    #[tokio::test]
    async fn test_dashboard_html() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Competitor Intelligence"));
        assert!(html.contains("/api/overview"));
        // A failed refresh must still re-enable the button.
        assert!(html.contains("} finally {"));
    }
}
