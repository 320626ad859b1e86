use crate::display_data::{self, CarbonStats, DisplayData, Percentiles, RankedFeature};
use crate::errors::AppError;
use crate::estimator::round1;
use crate::models::*;
use crate::orchestrator::{compute_locally, EstimationOrchestrator};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Remote-first footprint engine.
    pub orchestrator: EstimationOrchestrator,
    /// Population statistics for comparison views.
    pub display: DisplayData,
}

/// Footprint result plus how it compares to the population average.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FootprintResponse {
    pub source: EstimateSource,
    pub breakdown: EmissionBreakdown,
    #[schema(value_type = Vec<String>)]
    pub suggestions: Vec<Suggestion>,
    /// Positive when above the average footprint, negative when below.
    pub comparison_to_average_pct: f64,
}

impl FootprintResponse {
    fn new(result: FootprintResult, stats: &CarbonStats) -> Self {
        let comparison = display_data::compare_to_average(result.breakdown.total, stats);
        Self {
            source: result.source,
            breakdown: result.breakdown,
            suggestions: result.suggestions,
            comparison_to_average_pct: round1(comparison),
        }
    }
}

fn validated(
    payload: Result<Json<LifestyleForm>, JsonRejection>,
) -> Result<LifestyleInput, AppError> {
    let Json(form) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(LifestyleInput::try_from(form)?)
}

/// Health check endpoint.
///
/// Returns the service status, version, and whether the predictor answers.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let predictor = match state.orchestrator.predictor() {
        Some(client) => {
            if client.is_reachable().await {
                "reachable"
            } else {
                "unreachable"
            }
        }
        None => "disabled",
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "carbon-footprint-api",
            "version": env!("CARGO_PKG_VERSION"),
            "predictor": predictor
        })),
    )
}

/// POST /api/v1/footprint
///
/// Estimates the monthly footprint, remote predictor first, local fallback.
#[utoipa::path(
    post,
    path = "/api/v1/footprint",
    tag = "footprint",
    request_body = LifestyleInput,
    responses(
        (status = 200, description = "Footprint estimate", body = FootprintResponse),
        (status = 400, description = "Invalid questionnaire")
    )
)]
pub async fn compute_footprint(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LifestyleForm>, JsonRejection>,
) -> Result<Json<FootprintResponse>, AppError> {
    let input = validated(payload)?;
    let result = state.orchestrator.compute_footprint(&input).await;

    tracing::info!(
        "Footprint computed ({:?}): {:.1} kg CO2/month, {} suggestions",
        result.source,
        result.breakdown.total,
        result.suggestions.len()
    );

    Ok(Json(FootprintResponse::new(result, &state.display.stats)))
}

/// POST /api/v1/footprint/local
///
/// Same as `/api/v1/footprint` but never contacts the predictor.
#[utoipa::path(
    post,
    path = "/api/v1/footprint/local",
    tag = "footprint",
    request_body = LifestyleInput,
    responses(
        (status = 200, description = "Local footprint estimate", body = FootprintResponse),
        (status = 400, description = "Invalid questionnaire")
    )
)]
pub async fn compute_footprint_local(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LifestyleForm>, JsonRejection>,
) -> Result<Json<FootprintResponse>, AppError> {
    let input = validated(payload)?;
    Ok(Json(FootprintResponse::new(
        compute_locally(&input),
        &state.display.stats,
    )))
}

/// GET /api/v1/stats
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "footprint",
    responses((status = 200, description = "Population statistics", body = DisplayData))
)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<DisplayData> {
    Json(state.display.clone())
}

#[derive(OpenApi)]
#[openapi(
    paths(health, compute_footprint, compute_footprint_local, get_stats),
    components(schemas(
        LifestyleInput,
        TransportMode,
        AcUsage,
        EmissionBreakdown,
        EstimateSource,
        FootprintResponse,
        DisplayData,
        CarbonStats,
        Percentiles,
        RankedFeature
    )),
    tags((name = "footprint", description = "Monthly carbon footprint estimation"))
)]
pub struct ApiDoc;

/// Footprint and statistics endpoints. The caller decides which protective
/// layers (body limit, rate limiting) wrap them.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/footprint", post(compute_footprint))
        .route("/api/v1/footprint/local", post(compute_footprint_local))
        .route("/api/v1/stats", get(get_stats))
}

/// Full application: health check and API docs around `api`.
pub fn router(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
