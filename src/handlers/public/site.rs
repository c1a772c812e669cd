// handlers/public/site.rs - Service info, health and crawler files

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::content::{robots_txt, sitemap_xml};

/// GET / - Service name, version and route overview
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Landing API (Rust)",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Landing page backend with a tenant-scoped content backoffice",
            "endpoints": {
                "health": "/health (public)",
                "landing": "/api/landing (public)",
                "leads": "/api/leads (public, POST)",
                "uploads": "/uploads/* (public)",
                "session": "/api/admin/login, /api/admin/logout (public)",
                "admin": "/api/admin/* (session cookie)",
            }
        }
    }))
}

/// GET /health - Database ping; 503 when the pool cannot answer
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.config.api.site_url),
    )
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_xml(&state.config.api.site_url, Utc::now()),
    )
}
