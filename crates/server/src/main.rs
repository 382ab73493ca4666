use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use indovate_core::backend::http::HttpAnalysisBackend;
use indovate_core::backend::AnalysisBackend;
use indovate_core::config::Settings;
use indovate_core::dashboard::state::{DashboardState, SliceStatus};
use indovate_core::dashboard::Dashboard;
use indovate_core::domain::validation::ValidationSource;
use indovate_core::view::carousel::Carousel;
use indovate_core::view::chart::{chart_frame, ChartFrame};
use indovate_core::view::gauge::{gauge, Gauge};
use indovate_core::view::panels::analysis_text;

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

    let backend = HttpAnalysisBackend::from_settings(&settings)?;
    tracing::info!(backend = %backend.base_url(), "analysis backend configured");

    let state = AppState {
        dashboard: Arc::new(Dashboard::new(Arc::new(backend))),
        settings: Arc::new(settings),
    };

    let app = app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/search", post(post_search))
        .route("/state", get(get_state))
        .route("/validations", get(get_validations))
        .route("/chart", get(get_chart))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    dashboard: Arc<Dashboard>,
    settings: Arc<Settings>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct SearchAccepted {
    generation: u64,
    query: String,
}

async fn post_search(State(state): State<AppState>, Json(req): Json<SearchRequest>) -> Response {
    let Some((generation, query)) = state.dashboard.begin_search(&req.query) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let dashboard = Arc::clone(&state.dashboard);
    let q = query.clone();
    tokio::spawn(async move {
        dashboard.run_search(generation, &q).await;
    });

    (
        StatusCode::ACCEPTED,
        Json(SearchAccepted { generation, query }),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
struct ApiState {
    #[serde(flatten)]
    state: DashboardState,
    show_results: bool,
    gauge: Gauge,
    chart: ChartFrame,
    analysis_text: String,
}

async fn get_state(State(state): State<AppState>) -> Json<ApiState> {
    let snapshot = state.dashboard.snapshot();
    Json(ApiState {
        show_results: snapshot.show_results(),
        gauge: gauge(snapshot.sentiment.strength),
        chart: chart_frame(&snapshot, Instant::now(), state.settings.chart_delay),
        analysis_text: analysis_text(&snapshot).to_string(),
        state: snapshot,
    })
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default)]
    page: usize,
}

#[derive(Debug, Serialize)]
struct ApiValidationsPage {
    offset: usize,
    page_size: usize,
    total: usize,
    items: Vec<ValidationSource>,
}

async fn get_validations(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiValidationsPage>, StatusCode> {
    let mut rx = state.dashboard.subscribe();
    let status = rx.borrow_and_update().slices.validations.clone();
    match status {
        SliceStatus::Idle | SliceStatus::Failed(_) => state.dashboard.load_validations().await,
        // Another request is already fetching; wait for its result instead of serving an empty page.
        SliceStatus::Loading => {
            if rx
                .wait_for(|s| s.slices.validations != SliceStatus::Loading)
                .await
                .is_err()
            {
                return Err(StatusCode::SERVICE_UNAVAILABLE);
            }
        }
        SliceStatus::Ready => {}
    }

    let snapshot = state.dashboard.snapshot();
    if let Some(reason) = snapshot.slices.validations.failure() {
        tracing::error!(%reason, "validation sources unavailable");
        return Err(StatusCode::BAD_GATEWAY);
    }

    let mut carousel = Carousel::new(
        snapshot.validations.len(),
        state.settings.carousel_page_size,
    );
    carousel.jump_to_page(params.page);

    Ok(Json(ApiValidationsPage {
        offset: carousel.offset(),
        page_size: carousel.page_size(),
        total: snapshot.validations.len(),
        items: carousel.window(&snapshot.validations).to_vec(),
    }))
}

async fn get_chart(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let Some(session) = state.dashboard.snapshot().session else {
        return Err(StatusCode::NOT_FOUND);
    };

    let doc = state
        .dashboard
        .backend()
        .chart(&session)
        .await
        .map_err(|e| {
            let err = anyhow::Error::new(e);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%session, error = %err, "chart fetch failed");
            StatusCode::BAD_GATEWAY
        })?;

    let content_type = doc
        .content_type
        .unwrap_or_else(|| "text/html; charset=utf-8".to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], doc.body).into_response())
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
