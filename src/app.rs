//! Application state, router and server lifecycle.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::SessionCodec;
use crate::config::AppConfig;
use crate::database::repository::{AdminRepository, LandingRepository, LeadRepository, TenantRepository};
use crate::database::Database;
use crate::handlers::{protected, public};
use crate::middleware::{admin_context_middleware, require_admin_session};
use crate::services::{AuthService, ContentService, LeadService, PublishedCache, TenantService};
use crate::uploads::UploadPipeline;

/// Multipart envelope allowance on top of the file size limit.
const UPLOAD_BODY_OVERHEAD: usize = 2 * 1024 * 1024;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub tenants: TenantService,
    pub content: ContentService,
    pub leads: LeadService,
    pub auth: AuthService,
    pub uploads: UploadPipeline,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        let config = Arc::new(config);
        let pool = db.pool().clone();

        let tenants = TenantService::new(TenantRepository::new(pool.clone()), config.tenant.default_domain.clone());
        let cache = PublishedCache::new(Duration::from_secs(config.api.published_cache_ttl_secs));
        let content = ContentService::new(LandingRepository::new(pool.clone()), tenants.clone(), cache);
        let leads = LeadService::new(LeadRepository::new(pool.clone()));
        let codec = SessionCodec::new(&config.security.auth_secret, config.security.session_ttl_secs);
        let auth = AuthService::new(AdminRepository::new(pool), codec, config.clone());
        let uploads = UploadPipeline::from_config(&config.uploads);

        Self {
            config,
            db,
            tenants,
            content,
            leads,
            auth,
            uploads,
        }
    }
}

/// Connect, migrate and assemble the shared state.
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let db = Database::connect(&config.database).await?;
    db.migrate().await?;
    Ok(AppState::new(config, db))
}

pub fn router(state: AppState) -> Router {
    let upload_limit = usize::try_from(state.uploads.max_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(UPLOAD_BODY_OVERHEAD);

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/robots.txt", get(public::robots))
        .route("/sitemap.xml", get(public::sitemap))
        .route("/api/landing", get(public::landing_get))
        .route("/api/leads", post(public::lead_create))
        .route("/uploads/*path", get(public::upload_get))
        // Session management
        .route("/api/admin/login", post(public::login))
        .route("/api/admin/logout", post(public::logout))
        // Backoffice
        .merge(admin_routes(state.clone(), upload_limit))
        .layer(middleware::from_fn(require_admin_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes(state: AppState, upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/landing",
            get(protected::landing_get).put(protected::landing_put),
        )
        .route("/api/admin/publish", post(protected::publish))
        .route("/api/admin/publishes", get(protected::publishes))
        .route("/api/admin/leads", get(protected::leads_list))
        .route("/api/admin/leads/export", get(protected::leads_export))
        .route(
            "/api/admin/upload",
            post(protected::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_context_middleware))
}

/// Run the HTTP server until Ctrl-C or SIGTERM, then close the pool.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", state.config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let db = state.db.clone();

    info!(
        "Landing API listening on http://{} ({:?})",
        bind_addr, state.config.environment
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
