use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::cli::ServeArgs;
use crate::error::ApiError;
use crate::models::{
    CountyStats, FilterRequest, NetworkMembership, Provider, RadiusAnalysis, Recommendation,
    SpecialtyDensityReport, TerminatedAnalysisResult,
};
use crate::query::Analytics;
use crate::source::Snapshot;
use crate::storage::StoragePaths;

const SERVICE_NAME: &str = "network-analytics";
const DEFAULT_RADIUS_MILES: i64 = 25;

#[derive(Clone)]
struct AppState {
    analytics: Analytics<Snapshot>,
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn run(opts: ServeArgs) -> anyhow::Result<()> {
    let paths = StoragePaths::new(&opts.data_dir);
    let snapshot = Snapshot::load(&paths).context("load data snapshot")?;
    let analytics = Analytics::new(Arc::new(snapshot));

    let cors = cors_layer(&opts.allow_origin)?;
    let app = router(analytics).layer(cors);

    let addr: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .context("parse host:port")?;

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn router(analytics: Analytics<Snapshot>) -> Router {
    let api = Router::new()
        .route("/providers", get(api_providers))
        .route("/provider-network", get(api_provider_network))
        .route("/county-data", get(api_all_county_data))
        .route("/county-data/:county", get(api_county_data))
        .route("/recommendations/:county", get(api_recommendations))
        .route("/filters", post(api_filtered_providers))
        .route("/active-providers", get(api_active_providers))
        .route("/terminated-analysis", get(api_terminated_analysis))
        .route(
            "/terminated-analysis/:county",
            get(api_county_terminated_analysis),
        )
        .route("/specialty-density/:county", get(api_specialty_density))
        .route("/radius-analysis/:county", get(api_radius_analysis));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(AppState { analytics })
}

fn cors_layer(allow_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = if allow_origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let value = HeaderValue::from_str(allow_origin.trim())
            .with_context(|| format!("invalid allowed origin {allow_origin}"))?;
        AllowOrigin::exact(value)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::HEAD, Method::POST])
        .allow_headers(Any))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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
    tracing::info!("Shutting down server...");
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    service: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        service: SERVICE_NAME,
    })
}

async fn api_providers(State(st): State<AppState>) -> ApiResult<Vec<Provider>> {
    Ok(Json(st.analytics.providers()?))
}

async fn api_provider_network(State(st): State<AppState>) -> ApiResult<Vec<NetworkMembership>> {
    Ok(Json(st.analytics.memberships()?))
}

async fn api_all_county_data(State(st): State<AppState>) -> ApiResult<Vec<CountyStats>> {
    tracing::info!("Getting all county data");
    let data = st.analytics.county_stats()?;
    tracing::info!("Retrieved data for {} counties", data.len());
    Ok(Json(data))
}

async fn api_county_data(
    State(st): State<AppState>,
    Path(county): Path<String>,
) -> ApiResult<CountyStats> {
    tracing::info!("Getting data for county {}", county);
    Ok(Json(st.analytics.county_stats_for(&county)?))
}

async fn api_recommendations(
    State(st): State<AppState>,
    Path(county): Path<String>,
) -> ApiResult<Vec<Recommendation>> {
    let recs = st.analytics.recommendations(&county)?;
    tracing::info!("Generated {} recommendations for {}", recs.len(), county);
    Ok(Json(recs))
}

async fn api_filtered_providers(
    State(st): State<AppState>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Vec<Provider>> {
    let Json(filter) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::info!(
        "Filtering providers: specialty={} network={}",
        filter.specialty,
        filter.network
    );
    let providers = st.analytics.filtered_providers(&filter)?;
    tracing::info!("Filtered {} providers", providers.len());
    Ok(Json(providers))
}

#[derive(Debug, Serialize)]
struct ActiveProvidersResponse {
    total_active_providers: usize,
}

async fn api_active_providers(State(st): State<AppState>) -> ApiResult<ActiveProvidersResponse> {
    Ok(Json(ActiveProvidersResponse {
        total_active_providers: st.analytics.active_provider_count()?,
    }))
}

#[derive(Debug, Deserialize)]
struct TerminatedParams {
    network_id: Option<String>,
}

async fn api_terminated_analysis(
    State(st): State<AppState>,
    Query(p): Query<TerminatedParams>,
) -> ApiResult<TerminatedAnalysisResult> {
    let network_id = p.network_id.unwrap_or_default();
    Ok(Json(st.analytics.terminated_network_analysis(&network_id)?))
}

async fn api_county_terminated_analysis(
    State(st): State<AppState>,
    Path(county): Path<String>,
    Query(p): Query<TerminatedParams>,
) -> ApiResult<TerminatedAnalysisResult> {
    let network_id = p.network_id.unwrap_or_default();
    Ok(Json(
        st.analytics
            .county_terminated_network_analysis(&county, &network_id)?,
    ))
}

async fn api_specialty_density(
    State(st): State<AppState>,
    Path(county): Path<String>,
) -> ApiResult<SpecialtyDensityReport> {
    Ok(Json(st.analytics.specialty_density(&county)?))
}

#[derive(Debug, Deserialize)]
struct RadiusParams {
    radius: Option<String>,
    network: Option<String>,
}

async fn api_radius_analysis(
    State(st): State<AppState>,
    Path(county): Path<String>,
    Query(p): Query<RadiusParams>,
) -> ApiResult<RadiusAnalysis> {
    let radius = parse_radius(p.radius.as_deref());
    let network = p.network.unwrap_or_default();
    Ok(Json(st.analytics.radius_analysis(&county, radius, &network)?))
}

/// Missing or unparsable values fall back to the default radius. Signed
/// values are echoed as given.
fn parse_radius(s: Option<&str>) -> i64 {
    s.and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RADIUS_MILES)
}
