use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use marketmood_core::classify::hf::HfInferenceModel;
use marketmood_core::classify::Classifier;
use marketmood_core::config::{RunInputs, Settings};
use marketmood_core::domain::snapshot::AnalysisSnapshot;
use marketmood_core::ingest::news::GoogleNewsClient;
use marketmood_core::ingest::quote::FinnhubClient;
use marketmood_core::pipeline::signal::SignalThresholds;
use marketmood_core::pipeline::{Analyzer, RunGate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    // Invalid configuration is fatal at startup: with no valid run inputs
    // this service has nothing it could ever serve.
    let inputs = match RunInputs::from_settings(&settings) {
        Ok(inputs) => inputs,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "invalid configuration; refusing to start");
            return Err(err);
        }
    };

    let quotes = Arc::new(FinnhubClient::from_settings(&settings)?);
    let news = Arc::new(GoogleNewsClient::new()?);
    let classifier = Classifier::new(Arc::new(HfInferenceModel::from_settings(&settings)));
    let analyzer = Analyzer::new(
        inputs,
        quotes,
        news,
        classifier,
        SignalThresholds::default(),
    );

    let state = AppState {
        analyzer: Arc::new(analyzer),
        current: Arc::new(RwLock::new(None)),
        gate: Arc::new(RunGate::new()),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/snapshots/latest", get(get_latest_snapshot))
        .route("/refresh", post(refresh))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
    /// Most recent completed run, replaced wholesale under the write lock.
    current: Arc<RwLock<Option<ApiSnapshot>>>,
    gate: Arc<RunGate>,
}

#[derive(Debug, Clone, Serialize)]
struct ApiSnapshot {
    snapshot_id: Uuid,
    snapshot: AnalysisSnapshot,
}

async fn get_latest_snapshot(
    State(state): State<AppState>,
) -> Result<Json<ApiSnapshot>, StatusCode> {
    let current = state.current.read().await;
    current.clone().map(Json).ok_or(StatusCode::NOT_FOUND)
}

// A refresh arriving while another run is in flight gets 409 instead of
// queueing behind it.
async fn refresh(State(state): State<AppState>) -> Result<Json<ApiSnapshot>, StatusCode> {
    let Some(_permit) = state.gate.try_acquire() else {
        tracing::warn!("refresh rejected; another run is in progress");
        return Err(StatusCode::CONFLICT);
    };

    tracing::info!(ticker = %state.analyzer.ticker(), "refresh started");
    let snapshot = state.analyzer.run().await;
    let api_snapshot = ApiSnapshot {
        snapshot_id: Uuid::new_v4(),
        snapshot,
    };

    *state.current.write().await = Some(api_snapshot.clone());

    Ok(Json(api_snapshot))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
