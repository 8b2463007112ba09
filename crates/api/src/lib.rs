//! Quake Alert API Server
//!
//! REST and WebSocket surface over the alert engine: report ingestion,
//! open-alert listing, acknowledgment, autoclose, suppression-window
//! settings, and the live alert stream.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod metrics;
mod routes;
mod ws;

pub use config::ApiConfig;
pub use error::ApiError;

use alerting::{LifecycleManager, SuppressionEngine, Sweeper};
use broadcast::{AlertBus, BroadcastHub};
use storage::{AlertStore, KvCache, SettingsStore};

/// Application state shared across handlers
pub struct AppState {
    pub cache: Arc<KvCache>,
    pub store: AlertStore,
    pub settings: SettingsStore,
    pub engine: SuppressionEngine,
    pub lifecycle: LifecycleManager,
    pub bus: AlertBus,
    pub hub: Arc<BroadcastHub>,
    pub config: ApiConfig,
    pub prometheus: PrometheusHandle,
    pub version: String,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire up the cache, engine, lifecycle manager, bus, and hub
    pub fn new(config: ApiConfig, prometheus: PrometheusHandle) -> Self {
        let cache = Arc::new(KvCache::new());
        let store = AlertStore::new(cache.clone());
        let settings = SettingsStore::new(cache.clone(), config.suppress_window_secs);
        let bus = AlertBus::new();
        let engine = SuppressionEngine::new(store.clone(), settings.clone(), bus.clone());
        let lifecycle = LifecycleManager::new(store.clone(), bus.clone());

        Self {
            cache,
            store,
            settings,
            engine,
            lifecycle,
            bus,
            hub: Arc::new(BroadcastHub::new()),
            config,
            prometheus,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Uniform response envelope: `{"message": ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn message(message: String) -> Self {
        Self {
            message,
            data: None,
        }
    }

    pub fn with_data(message: String, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub cache: String,
    pub subscribers: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/earthquake", post(routes::earthquake::create_earthquake))
        .route("/api/earthquake/alerts", get(routes::earthquake::get_alerts))
        .route(
            "/api/earthquake/alerts/:id",
            put(routes::earthquake::acknowledge_alert),
        )
        .route(
            "/api/earthquake/autoclose",
            post(routes::earthquake::autoclose_alerts),
        )
        .route(
            "/api/settings/alert-suppress-time",
            get(routes::settings::get_suppress_time).put(routes::settings::set_suppress_time),
        )
        .route("/api/admin/cache", delete(routes::admin::clear_cache))
        .route("/ws/alerts", get(ws::alerts_ws))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root_handler() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(
        "Welcome to the Quake Alert API!".to_string(),
    ))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache_ok = state.cache.ping().await.is_ok();
    let response = HealthResponse {
        status: if cache_ok { "healthy" } else { "degraded" }.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        cache: if cache_ok { "ok" } else { "unreachable" }.to_string(),
        subscribers: state.hub.subscriber_count().await,
    };
    let status = if cache_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.prometheus.render()
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server: installs the metrics recorder, spawns the bus listener
/// and the autoclose sweeper, then serves until the process exits.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    let state = Arc::new(AppState::new(config.clone(), prometheus));

    let _listener_task = state.hub.listen(&state.bus);
    let _sweeper = Sweeper::new(
        state.lifecycle.clone(),
        config.sweep_interval_secs,
        config.autoclose_timeout_secs,
    )
    .spawn();

    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
